use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::thread;
use sync_job_queue::{FifoJobQueue, JobQueue, LifoJobQueue, PrioJobQueue};

// Number of ping-pong round trips per benchmark iteration
const PING_PONGS: usize = 10_000;

/// Bounces one job back and forth between two threads over a pair of queues,
/// so every pop has to be woken by the other side's push.
fn ping_pong<Q>(make: fn() -> Q)
where
    Q: JobQueue<u32> + Send + Sync + 'static,
{
    let q1 = Arc::new(make());
    let q2 = Arc::new(make());

    // Ping thread
    let q1_ping = q1.clone();
    let q2_ping = q2.clone();
    let ping_thread = thread::spawn(move || {
        for i in 0..PING_PONGS {
            q1_ping.push(black_box(i as u32)).unwrap();
            black_box(q2_ping.pop().unwrap());
        }
    });

    // Pong thread
    let pong_thread = thread::spawn(move || {
        for _ in 0..PING_PONGS {
            let val = q1.pop().unwrap();
            q2.push(black_box(val)).unwrap();
        }
    });

    ping_thread.join().unwrap();
    pong_thread.join().unwrap();
}

fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency");
    group.sample_size(20);

    group.bench_function(BenchmarkId::new("FifoJobQueue", "ping-pong"), |b| {
        b.iter(|| ping_pong(FifoJobQueue::<u32>::new))
    });

    group.bench_function(BenchmarkId::new("LifoJobQueue", "ping-pong"), |b| {
        b.iter(|| ping_pong(LifoJobQueue::<u32>::new))
    });

    group.bench_function(BenchmarkId::new("PrioJobQueue", "ping-pong"), |b| {
        b.iter(|| ping_pong(PrioJobQueue::<u32>::new))
    });

    group.finish();
}

criterion_group!(benches, bench_latency);
criterion_main!(benches);
