//! # sync_job_queue
//!
//! An unbounded, blocking job queue for handing units of work between threads.
//!
//! The draining order is chosen at compile time: first-in-first-out,
//! last-in-first-out, or greatest-first by the job's `Ord`. Consumers can pop
//! blocking, non-blocking, or in batches, and a cooperative stop wakes every
//! waiting consumer while still letting them drain what was queued.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use sync_job_queue::FifoJobQueue;
//!
//! let queue = Arc::new(FifoJobQueue::<u64>::new());
//!
//! let worker = {
//!     let queue = queue.clone();
//!     thread::spawn(move || {
//!         let mut sum = 0;
//!         while let Ok(job) = queue.pop() {
//!             sum += job;
//!         }
//!         sum
//!     })
//! };
//!
//! for job in 1..=10 {
//!     queue.push(job).unwrap();
//! }
//! queue.stop();
//!
//! assert_eq!(worker.join().unwrap(), 55);
//! ```

mod common;
mod error;

pub mod blocking_queue;
pub mod order;

// Re-exports for convenience
pub use blocking_queue::{BlockingQueue, FifoJobQueue, LifoJobQueue, PrioJobQueue};
pub use common::{JobQueue, QueueState};
pub use error::{Closed, PushError, TryPopError};
pub use order::{Fifo, JobStore, Lifo, OrderPolicy, Priority};
