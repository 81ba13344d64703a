//! The [`QueueStore`]: line-level operations over the topic directory.
//!
//! Every operation here is total. An absent topic reads as an empty queue,
//! and nothing returns an error.
//!
//! # Locking
//!
//! An operation resolves its topic through the [`TopicDirectory`], then holds
//! that one queue's lock for the duration of the mutation. No operation holds
//! two queue locks at once. Moves between topics therefore run in two phases:
//! extract under the source lock, release it, then insert under the
//! destination lock. Between the phases a moved line is in neither queue, and
//! a concurrent reader can observe that.

use std::sync::Arc;

use tracing::debug;

use crate::directory::TopicDirectory;
use crate::listing::TopicCount;
use crate::queue::Queue;

/// Concurrent registry of named queues of unique, insertion-ordered lines.
#[derive(Debug, Default)]
pub struct QueueStore {
    directory: TopicDirectory,
}

impl QueueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `lines` to `topic`, creating the topic if needed.
    ///
    /// Returns how many lines were newly inserted. Lines already in the queue,
    /// or repeated within `lines`, do not count.
    pub fn push<I, S>(&self, topic: &str, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queue = self.directory.get_or_create(topic);
        let mut set = queue.lock();
        lines
            .into_iter()
            .filter(|line| set.add(line.as_ref()))
            .count()
    }

    /// Replace the contents of `topic` with `lines`. Returns the new size.
    pub fn replace<I, S>(&self, topic: &str, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.directory.replace(topic, lines)
    }

    /// Remove each of `lines` from `topic`. Returns how many were removed.
    pub fn delete_lines<I, S>(&self, topic: &str, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(queue) = self.directory.get(topic) else {
            return 0;
        };
        let mut set = queue.lock();
        lines
            .into_iter()
            .filter(|line| set.remove(line.as_ref()))
            .count()
    }

    /// Empty `topic`, keeping it in the directory. Returns the prior size.
    pub fn clear(&self, topic: &str) -> usize {
        self.directory
            .get(topic)
            .map_or(0, |queue| queue.clear())
    }

    /// Drop `topic` from the directory. Returns the size it had.
    pub fn remove_topic(&self, topic: &str) -> usize {
        self.directory.remove(topic).map_or(0, |queue| queue.len())
    }

    /// Drop every topic. Returns the best-effort total of lines dropped.
    pub fn clear_all(&self) -> usize {
        self.directory.clear_all()
    }

    /// All lines of `topic`, in insertion order.
    pub fn read_all(&self, topic: &str) -> Vec<String> {
        self.directory
            .get(topic)
            .map(|queue| queue.snapshot())
            .unwrap_or_default()
    }

    /// The subsequence of `candidates` present in `topic`, in the caller's
    /// order.
    pub fn read_matching<I, S>(&self, topic: &str, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(queue) = self.directory.get(topic) else {
            return Vec::new();
        };
        let set = queue.lock();
        candidates
            .into_iter()
            .filter(|line| set.contains(line.as_ref()))
            .map(|line| line.as_ref().to_owned())
            .collect()
    }

    /// Remove and return the oldest line of `topic`.
    pub fn shift(&self, topic: &str) -> Option<String> {
        self.directory.get(topic)?.lock().pop_front()
    }

    /// Move each of `lines` that is present in `from` over to `to`.
    ///
    /// Returns the moved lines in the order they appear in `lines`. When
    /// nothing moved, `to` is left untouched and is not created.
    pub fn move_lines<I, S>(&self, from: &str, to: &str, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let moved: Vec<String> = match self.directory.get(from) {
            Some(queue) => {
                let mut set = queue.lock();
                lines
                    .into_iter()
                    .filter(|line| set.remove(line.as_ref()))
                    .map(|line| line.as_ref().to_owned())
                    .collect()
            }
            None => Vec::new(),
        };

        if !moved.is_empty() {
            self.insert_all(to, &moved);
            debug!(from, to, count = moved.len(), "moved lines");
        }
        moved
    }

    /// Shift the oldest line of `from` and push it onto `to`.
    pub fn shift_over(&self, from: &str, to: &str) -> Option<String> {
        let line = self.shift(from)?;
        self.insert_all(to, std::slice::from_ref(&line));
        Some(line)
    }

    /// Non-empty topics with their sizes, sorted by name.
    pub fn list(&self) -> Vec<TopicCount> {
        self.directory.list_non_empty()
    }

    /// Number of topics known to the store, empty ones included.
    pub fn topic_count(&self) -> usize {
        self.directory.len()
    }

    /// Inspection hook: the queue object currently registered for `topic`.
    ///
    /// Unlike [`read_all`](Self::read_all), this tells an absent topic apart
    /// from an empty one, and lets callers compare queue identity across a
    /// `replace` or removal. The handle is not refreshed: once the topic is
    /// replaced or removed, writes through it are no longer visible.
    pub fn queue(&self, topic: &str) -> Option<Arc<Queue>> {
        self.directory.get(topic)
    }

    fn insert_all(&self, topic: &str, lines: &[String]) {
        let queue = self.directory.get_or_create(topic);
        let mut set = queue.lock();
        for line in lines {
            set.add(line);
        }
    }
}
