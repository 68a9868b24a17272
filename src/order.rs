//! Draining-order policies for the blocking queue
//!
//! An order policy is a zero-sized tag type selected at compile time. Each tag
//! names the backing store that realises its removal rule, so the queue itself
//! never branches on the order at runtime.

use std::collections::{BinaryHeap, VecDeque};

/// Backing storage for queued jobs
///
/// `insert` and `remove` together define the draining order. Implementations
/// are not synchronised; the queue only touches them while holding its lock.
pub trait JobStore<T> {
    /// Creates an empty store with room for at least `capacity` jobs
    fn with_capacity(capacity: usize) -> Self;

    /// Adds a job according to the store's insertion rule
    fn insert(&mut self, job: T);

    /// Removes the next job according to the store's removal rule
    fn remove(&mut self) -> Option<T>;

    /// Returns the number of jobs held
    fn len(&self) -> usize;

    /// Returns true if no jobs are held
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every job in the store's native iteration order
    fn visit<F: FnMut(&T)>(&self, f: F);

    /// Restores the store's ordering invariant after an insert or remove was
    /// interrupted by a panic
    ///
    /// Stores whose order does not depend on job comparisons have nothing to
    /// restore.
    fn repair(&mut self) {}
}

/// Compile-time selection of a draining order
pub trait OrderPolicy<T> {
    /// The store whose removal rule implements this order
    type Store: JobStore<T>;

    /// Human readable name, used in logs and `Debug` output
    const NAME: &'static str;
}

/// First in, first out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fifo;

/// Last in, first out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifo;

/// Greatest job first, as defined by the job's `Ord` implementation
///
/// Wrap jobs in [`std::cmp::Reverse`] for smallest-first draining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Priority;

impl<T> OrderPolicy<T> for Fifo {
    type Store = VecDeque<T>;
    const NAME: &'static str = "fifo";
}

impl<T> OrderPolicy<T> for Lifo {
    type Store = Vec<T>;
    const NAME: &'static str = "lifo";
}

impl<T: Ord> OrderPolicy<T> for Priority {
    type Store = BinaryHeap<T>;
    const NAME: &'static str = "priority";
}

impl<T> JobStore<T> for VecDeque<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, job: T) {
        self.push_back(job);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop_front()
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn visit<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

// Stack: the top is the end of the vector
impl<T> JobStore<T> for Vec<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, job: T) {
        self.push(job);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn visit<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl<T: Ord> JobStore<T> for BinaryHeap<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        BinaryHeap::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, job: T) {
        self.push(job);
    }

    #[inline]
    fn remove(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn len(&self) -> usize {
        BinaryHeap::len(self)
    }

    /// Heap array order, which is unspecified beyond the first element
    fn visit<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    // A panicking `Ord` can stop a sift halfway; rebuild the heap from scratch
    fn repair(&mut self) {
        *self = std::mem::take(self).into_vec().into();
    }
}
