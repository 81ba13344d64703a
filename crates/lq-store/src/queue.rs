//! A single topic's queue: a [`LineSet`] behind its own mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::line_set::LineSet;

/// One topic's lines, guarded by a lock scoped to this queue alone.
///
/// Every store operation holds at most one `Queue` lock at a time, so there is
/// no lock ordering between queues to get wrong.
#[derive(Debug, Default)]
pub struct Queue {
    lines: Mutex<LineSet>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue that starts with `lines`, deduplicated in order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: Mutex::new(lines.into_iter().collect()),
        }
    }

    /// Lock the queue for mutation or a consistent read.
    ///
    /// A panic while the lock was held cannot leave the set half-updated in a
    /// way later callers would notice, so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, LineSet> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current size, read under the lock.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty the queue, returning its prior size.
    pub fn clear(&self) -> usize {
        self.lock().clear()
    }

    /// Point-in-time copy of the contents, in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().snapshot()
    }
}
