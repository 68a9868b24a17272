//! Mutex and condition variable backed job queue
//!
//! [`BlockingQueue`] hands jobs between any number of producer and consumer
//! threads. It never bounds its length; producers never wait. Consumers sleep
//! on a condition variable while the queue is empty and open, and are all woken
//! when the queue is stopped.
//!
//! Stopping is cooperative: jobs queued before [`BlockingQueue::stop`] are
//! still handed out, and only once the queue has drained do pops report
//! [`Closed`]. Pushes after a stop are refused.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crossbeam_utils::CachePadded;

use crate::common::{JobQueue, QueueState};
use crate::error::{Closed, PushError, TryPopError};
use crate::order::{Fifo, JobStore, Lifo, OrderPolicy, Priority};

/// State guarded by the queue lock
struct Inner<S> {
    jobs: S,
    /// Set once by `stop`, never cleared
    stopped: bool,
}

/// An unbounded, thread-safe job queue with a compile-time draining order
///
/// The order is selected by the `O` tag: [`Fifo`] (the default), [`Lifo`] or
/// [`Priority`]. Share the queue between threads by reference or through an
/// `Arc`; it is deliberately not `Clone`.
///
/// # Examples
///
/// ```
/// use sync_job_queue::{PrioJobQueue, TryPopError};
///
/// let queue = PrioJobQueue::new();
/// for job in [5, 3, 8, 1] {
///     queue.push(job).unwrap();
/// }
///
/// assert_eq!(queue.try_pop(), Ok(8));
/// assert_eq!(queue.try_pop(), Ok(5));
/// assert_eq!(queue.try_pop(), Ok(3));
/// assert_eq!(queue.try_pop(), Ok(1));
/// assert_eq!(queue.try_pop(), Err(TryPopError::Empty));
///
/// queue.stop();
/// assert_eq!(queue.try_pop(), Err(TryPopError::Closed));
/// ```
pub struct BlockingQueue<T, O = Fifo>
where
    O: OrderPolicy<T>,
{
    /// Jobs and the shutdown flag, kept on their own cache line
    inner: CachePadded<Mutex<Inner<O::Store>>>,

    /// Signalled when a job arrives (one waiter) or on stop (all waiters)
    has_job: Condvar,

    _marker: PhantomData<fn() -> (T, O)>,
}

/// First in, first out job queue
pub type FifoJobQueue<T> = BlockingQueue<T, Fifo>;

/// Last in, first out job queue
pub type LifoJobQueue<T> = BlockingQueue<T, Lifo>;

/// Greatest-first job queue
pub type PrioJobQueue<T> = BlockingQueue<T, Priority>;

impl<T, O: OrderPolicy<T>> BlockingQueue<T, O> {
    /// Creates a new empty, open queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty, open queue with room for `capacity` jobs before
    /// it reallocates
    ///
    /// The queue still grows past `capacity` on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: CachePadded::new(Mutex::new(Inner {
                jobs: <O::Store as JobStore<T>>::with_capacity(capacity),
                stopped: false,
            })),
            has_job: Condvar::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Inner<O::Store>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => self.recover(poisoned),
        }
    }

    /// Takes over a lock poisoned by a panic in user code
    ///
    /// A job's `Ord` runs inside `insert` and `remove`, so a panic there can
    /// leave the store out of order. The store is repaired before the poison
    /// flag is cleared; if the repair itself panics the lock stays poisoned
    /// and the next caller tries again.
    #[cold]
    fn recover<'a>(
        &'a self,
        poisoned: PoisonError<MutexGuard<'a, Inner<O::Store>>>,
    ) -> MutexGuard<'a, Inner<O::Store>> {
        let mut guard = poisoned.into_inner();
        guard.jobs.repair();
        self.inner.clear_poison();
        log::warn!(
            "{} job queue recovered from a panic while locked, {} job(s) kept",
            O::NAME,
            guard.jobs.len()
        );
        guard
    }

    /// Locks the queue and sleeps until it holds a job or has been stopped
    fn wait_for_job(&self) -> MutexGuard<'_, Inner<O::Store>> {
        let mut guard = self.lock();
        // Re-check after every wake: wake-ups may be spurious, and another
        // consumer may have taken the job first.
        while guard.jobs.is_empty() && !guard.stopped {
            guard = match self.has_job.wait(guard) {
                Ok(guard) => guard,
                Err(poisoned) => self.recover(poisoned),
            };
        }
        guard
    }

    /// Queues a job and wakes one waiting consumer
    ///
    /// Returns the job inside a [`PushError`] if the queue has been stopped.
    pub fn push(&self, job: T) -> Result<(), PushError<T>> {
        let mut guard = self.lock();
        if guard.stopped {
            drop(guard);
            log::trace!("{} job queue is stopped, rejecting push", O::NAME);
            return Err(PushError(job));
        }
        guard.jobs.insert(job);
        self.has_job.notify_one();
        Ok(())
    }

    /// Takes the next job, sleeping while the queue is empty and open
    ///
    /// Jobs queued before a stop are still returned. Once the queue is both
    /// stopped and empty this returns [`Closed`] without sleeping.
    pub fn pop(&self) -> Result<T, Closed> {
        let mut guard = self.wait_for_job();
        // Empty here means stopped
        guard.jobs.remove().ok_or(Closed)
    }

    /// Like [`pop`](Self::pop), but writes the job into `out`
    ///
    /// Returns `false`, leaving `out` untouched, once the queue is stopped and
    /// drained.
    pub fn pop_into(&self, out: &mut T) -> bool {
        match self.pop() {
            Ok(job) => {
                *out = job;
                true
            }
            Err(Closed) => false,
        }
    }

    /// Takes the next job if one is queued, never sleeping
    ///
    /// An empty queue reports [`TryPopError::Empty`] while open and
    /// [`TryPopError::Closed`] once stopped.
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        let mut guard = self.lock();
        let next = guard.jobs.remove();
        match next {
            Some(job) => Ok(job),
            None if guard.stopped => Err(TryPopError::Closed),
            None => Err(TryPopError::Empty),
        }
    }

    /// Moves up to `max` jobs into `out`, sleeping only until the first job
    /// is available
    ///
    /// Jobs are appended in draining order. Returns how many were appended,
    /// which is fewer than `max` if the queue ran dry and zero if `max` is
    /// zero. Returns [`Closed`] without touching `out` once the queue is
    /// stopped and drained.
    pub fn pop_batch(&self, out: &mut Vec<T>, max: usize) -> Result<usize, Closed> {
        let mut guard = self.wait_for_job();
        if guard.jobs.is_empty() {
            return Err(Closed);
        }

        let mut count = 0;
        while count < max {
            match guard.jobs.remove() {
                Some(job) => {
                    out.push(job);
                    count += 1;
                }
                None => break,
            }
        }

        // Hand leftover jobs to the next waiter
        let left = guard.jobs.len();
        if left > 0 {
            self.has_job.notify_one();
        }
        drop(guard);

        log::trace!(
            "{} job queue drained {} job(s) in one batch, {} left",
            O::NAME,
            count,
            left
        );
        Ok(count)
    }

    /// Requests shutdown and wakes every waiting consumer
    ///
    /// Queued jobs are kept and can still be popped. Calling `stop` again has
    /// no further effect.
    pub fn stop(&self) {
        let mut guard = self.lock();
        let first_stop = !guard.stopped;
        guard.stopped = true;
        let left = guard.jobs.len();
        drop(guard);
        self.has_job.notify_all();

        if first_stop {
            log::debug!(
                "stopping {} job queue, {} job(s) left to drain",
                O::NAME,
                left
            );
        }
    }

    /// Returns true once [`stop`](Self::stop) has been called
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Returns the lifecycle state at the time of the call
    pub fn state(&self) -> QueueState {
        let guard = self.lock();
        QueueState::from_parts(guard.stopped, guard.jobs.len())
    }

    /// Returns the number of queued jobs at the time of the call
    ///
    /// The value may be stale as soon as it is returned.
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    /// Checks if the queue was empty during this call
    pub fn is_empty(&self) -> bool {
        self.lock().jobs.is_empty()
    }

    /// Visits every queued job without removing any
    ///
    /// Jobs are visited in the store's native order: insertion order for
    /// [`Fifo`] and [`Lifo`], heap order for [`Priority`]. The queue stays
    /// locked for the whole traversal, so `f` must not call back into this
    /// queue; doing so deadlocks.
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.lock().jobs.visit(f);
    }
}

impl<T, O: OrderPolicy<T>> Default for BlockingQueue<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O: OrderPolicy<T>> fmt::Debug for BlockingQueue<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.lock();
        f.debug_struct("BlockingQueue")
            .field("order", &O::NAME)
            .field("len", &guard.jobs.len())
            .field("stopped", &guard.stopped)
            .finish()
    }
}

impl<T, O: OrderPolicy<T>> JobQueue<T> for BlockingQueue<T, O> {
    fn push(&self, job: T) -> Result<(), PushError<T>> {
        BlockingQueue::push(self, job)
    }

    fn pop(&self) -> Result<T, Closed> {
        BlockingQueue::pop(self)
    }

    fn try_pop(&self) -> Result<T, TryPopError> {
        BlockingQueue::try_pop(self)
    }

    fn stop(&self) {
        BlockingQueue::stop(self)
    }

    fn len(&self) -> usize {
        BlockingQueue::len(self)
    }

    fn is_empty(&self) -> bool {
        BlockingQueue::is_empty(self)
    }
}
