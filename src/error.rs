//! Error types reported by the blocking queue
//!
//! Every failure is a local return value: the queue never panics on its own
//! account. The only "failure" a consumer can observe is that the queue has been
//! stopped and has nothing left to hand out.

use std::fmt;

use thiserror::Error;

/// The queue has been stopped and holds no more jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("job queue is stopped and drained")]
pub struct Closed;

/// Outcome of a non-blocking pop that produced no job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TryPopError {
    /// The queue is open but currently empty; a later pop may succeed.
    #[error("job queue is empty")]
    Empty,

    /// The queue is stopped and empty; no pop will ever succeed again.
    #[error("job queue is stopped and drained")]
    Closed,
}

impl TryPopError {
    /// Returns true if the queue will never hand out another job
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, TryPopError::Closed)
    }

    /// Returns true if the queue was merely empty at the time of the call
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, TryPopError::Empty)
    }
}

impl From<Closed> for TryPopError {
    fn from(_: Closed) -> Self {
        TryPopError::Closed
    }
}

/// A push was refused because the queue had already been stopped.
///
/// The rejected job is handed back so the caller can reroute or drop it.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("job queue is stopped, push rejected")]
pub struct PushError<T>(pub T);

impl<T> PushError<T> {
    /// Takes back the job that could not be queued
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Jobs are often closures or handles without a Debug impl
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError").finish_non_exhaustive()
    }
}
