//! Common functionality for blocking job queues
//!
//! This module provides the shared trait and state types used by every
//! queue order.

use crate::error::{Closed, PushError, TryPopError};

/// Lifecycle of a queue
///
/// Transitions only move forward: `Open` → `Closing` → `Closed`, or straight
/// from `Open` to `Closed` when a queue is stopped while empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueState {
    /// Accepting pushes and handing out jobs
    Open,
    /// Stopped, but jobs pushed before the stop are still waiting to be drained
    Closing,
    /// Stopped and empty; every pop reports [`Closed`]
    Closed,
}

impl QueueState {
    /// Derives the state from the shutdown flag and the current job count
    #[inline]
    pub fn from_parts(stopped: bool, len: usize) -> Self {
        match (stopped, len) {
            (false, _) => QueueState::Open,
            (true, 0) => QueueState::Closed,
            (true, _) => QueueState::Closing,
        }
    }
}

/// Trait for blocking job queue operations
///
/// This trait defines the common interface that every queue order provides,
/// so producers, consumers and test harnesses can be written once.
pub trait JobQueue<T> {
    /// Queues a job and wakes one waiting consumer
    ///
    /// Returns the job inside a [`PushError`] if the queue was stopped.
    fn push(&self, job: T) -> Result<(), PushError<T>>;

    /// Takes the next job, sleeping while the queue is empty and open
    ///
    /// Returns [`Closed`] once the queue is stopped and drained.
    fn pop(&self) -> Result<T, Closed>;

    /// Takes the next job without ever sleeping
    fn try_pop(&self) -> Result<T, TryPopError>;

    /// Requests shutdown and wakes every waiting consumer
    fn stop(&self);

    /// Returns the number of queued jobs at the time of the call
    fn len(&self) -> usize;

    /// Checks if the queue was empty during this call
    fn is_empty(&self) -> bool;
}
