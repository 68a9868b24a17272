use std::sync::Arc;
use std::thread;
use std::time::Instant;
use sync_job_queue::{FifoJobQueue, PrioJobQueue, TryPopError};

fn main() {
    env_logger::init();

    println!("Blocking job queue example");
    println!("--------------------------\n");

    // Configuration
    const PRODUCERS: usize = 2; // Number of producer threads
    const CONSUMERS: usize = 3; // Number of consumer threads
    const N: u32 = 100_000; // Each producer pushes this many jobs into the queue

    // Create a queue object shared between all producers and consumers
    let queue = Arc::new(FifoJobQueue::<u32>::new());

    println!("Starting {} producers and {} consumers", PRODUCERS, CONSUMERS);
    println!("Each producer will push {} jobs\n", N);

    let start_time = Instant::now();

    // Start the consumers; each one runs until the queue is stopped and drained
    let mut consumer_threads = Vec::with_capacity(CONSUMERS);
    for _ in 0..CONSUMERS {
        let q = queue.clone();
        consumer_threads.push(thread::spawn(move || {
            let mut local_sum = 0u64;
            let mut batch = Vec::with_capacity(64);
            while let Ok(n) = q.pop_batch(&mut batch, 64) {
                local_sum += batch.drain(..n).map(u64::from).sum::<u64>();
            }
            local_sum
        }));
    }

    // Start the producers
    let mut producer_threads = Vec::with_capacity(PRODUCERS);
    for _ in 0..PRODUCERS {
        let q = queue.clone();
        producer_threads.push(thread::spawn(move || {
            for n in (1..=N).rev() {
                if q.push(n).is_err() {
                    break;
                }
            }
        }));
    }

    for handle in producer_threads {
        handle.join().unwrap();
    }

    // No more jobs: consumers finish what is queued, then see the queue closed
    queue.stop();

    let sums: Vec<u64> = consumer_threads
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let total_sum: u64 = sums.iter().sum();

    // The expected sum is N*(N+1)/2 * PRODUCERS
    let expected_sum: u64 = (N as u64 * (N as u64 + 1) / 2) * PRODUCERS as u64;

    println!("Execution time: {:?}", start_time.elapsed());
    println!("Total sum: {}", total_sum);
    println!("Expected sum: {}", expected_sum);

    if total_sum != expected_sum {
        println!("ERROR: Sum mismatch! Difference: {}", total_sum as i64 - expected_sum as i64);
    } else {
        println!("SUCCESS: All jobs were correctly processed.");
    }

    println!("\nPer-consumer statistics:");
    for (i, &sum) in sums.iter().enumerate() {
        println!("Consumer {}: sum = {}", i, sum);
    }

    // Priority order, non-blocking
    println!("\nPriority queue:");
    let prio = PrioJobQueue::new();
    for job in [5, 3, 8, 1] {
        prio.push(job).unwrap();
    }
    prio.for_each(|job| println!("  queued: {}", job));
    loop {
        match prio.try_pop() {
            Ok(job) => println!("  popped: {}", job),
            Err(TryPopError::Empty) => {
                println!("  empty, stopping");
                prio.stop();
            }
            Err(TryPopError::Closed) => {
                println!("  closed");
                break;
            }
        }
    }
}
