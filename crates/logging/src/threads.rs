//! crates/logging/src/threads.rs
//! Small, stable indices for the threads that log.

use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Append-only list of threads observed by a [`Logger`](crate::Logger).
///
/// A thread's index is the position at which it first logged. Indices stay
/// small and stable for the lifetime of the logger, which keeps interleaved
/// output from several threads easy to follow.
#[derive(Debug, Default)]
pub struct ThreadRegistry {
    threads: Mutex<Vec<ThreadId>>,
}

impl ThreadRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the calling thread, registering it on first use.
    pub fn current(&self) -> usize {
        self.index_of(thread::current().id())
    }

    /// Returns the index of `id`, registering it on first use.
    pub fn index_of(&self, id: ThreadId) -> usize {
        let mut threads = self.threads.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(index) = threads.iter().position(|known| *known == id) {
            return index;
        }
        threads.push(id);
        threads.len() - 1
    }

    /// Number of distinct threads seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.threads.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Reports whether no thread has logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
