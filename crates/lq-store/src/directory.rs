//! Topic directory: the map from topic name to [`Queue`].
//!
//! The map itself is immutable. Structural changes build a modified copy and
//! publish it with a compare-and-swap on an [`ArcSwap`], retrying on conflict.
//! Readers load the current snapshot without blocking, and no structural
//! change ever waits on a queue's lock.
//!
//! Line-level mutation happens inside each [`Queue`] and never touches the
//! map, so the two kinds of change are independent.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::listing::{self, TopicCount};
use crate::queue::Queue;

type TopicMap = HashMap<String, Arc<Queue>>;

/// Lock-free registry of topic queues.
#[derive(Debug)]
pub struct TopicDirectory {
    topics: ArcSwap<TopicMap>,
}

impl TopicDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            topics: ArcSwap::from_pointee(TopicMap::new()),
        }
    }

    /// Return the queue for `topic`, installing an empty one if there is none.
    ///
    /// Concurrent callers racing to create the same topic all receive the
    /// one queue that won the swap.
    pub fn get_or_create(&self, topic: &str) -> Arc<Queue> {
        loop {
            let current = self.topics.load_full();
            if let Some(queue) = current.get(topic) {
                return Arc::clone(queue);
            }

            let queue = Arc::new(Queue::new());
            let mut next = TopicMap::clone(&current);
            next.insert(topic.to_owned(), Arc::clone(&queue));

            let prev = self.topics.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*prev, &current) {
                debug!(topic, "created queue");
                return queue;
            }
        }
    }

    /// Return the queue for `topic`, if one exists.
    pub fn get(&self, topic: &str) -> Option<Arc<Queue>> {
        self.topics.load().get(topic).cloned()
    }

    /// Install a fresh queue holding `lines` (deduplicated, in order) for
    /// `topic`, discarding whatever queue was there. Returns the new size.
    ///
    /// A caller still holding the old queue finishes against that detached
    /// object; its effect is simply no longer visible.
    pub fn replace<I, S>(&self, topic: &str, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queue = Arc::new(Queue::from_lines(lines));
        let size = queue.len();
        self.topics.rcu(|current| {
            let mut next = TopicMap::clone(current);
            next.insert(topic.to_owned(), Arc::clone(&queue));
            next
        });
        debug!(topic, size, "replaced queue");
        size
    }

    /// Detach and return the queue for `topic`, if one exists.
    pub fn remove(&self, topic: &str) -> Option<Arc<Queue>> {
        loop {
            let current = self.topics.load_full();
            let queue = Arc::clone(current.get(topic)?);

            let mut next = TopicMap::clone(&current);
            next.remove(topic);

            let prev = self.topics.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*prev, &current) {
                debug!(topic, "removed queue");
                return Some(queue);
            }
        }
    }

    /// Swap in an empty directory and return the total number of lines the
    /// old one held.
    ///
    /// Each queue is sized under its own lock after the swap. The total is a
    /// best-effort aggregate: writers still holding a detached queue may
    /// change its size while the sum is being taken.
    pub fn clear_all(&self) -> usize {
        let old = self.topics.swap(Arc::new(TopicMap::new()));
        let total: usize = old.values().map(|queue| queue.len()).sum();
        debug!(topics = old.len(), total, "cleared all queues");
        total
    }

    /// Non-empty topics with their sizes, sorted by topic name.
    pub fn list_non_empty(&self) -> Vec<TopicCount> {
        listing::project(&self.topics.load())
    }

    /// Number of topics in the directory, empty queues included.
    pub fn len(&self) -> usize {
        self.topics.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TopicDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_reuses_existing_queue() {
        let dir = TopicDirectory::new();
        let a = dir.get_or_create("foo");
        let b = dir.get_or_create("foo");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn get_does_not_create() {
        let dir = TopicDirectory::new();
        assert!(dir.get("foo").is_none());
        assert!(dir.is_empty());
    }

    #[test]
    fn topics_are_case_sensitive() {
        let dir = TopicDirectory::new();
        let lower = dir.get_or_create("foo");
        let upper = dir.get_or_create("FOO");
        assert!(!Arc::ptr_eq(&lower, &upper));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn concurrent_creators_share_one_queue() {
        let dir = TopicDirectory::new();
        let queues: Vec<Arc<Queue>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| dir.get_or_create("shared")))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });
        let installed = dir.get("shared").unwrap();
        for queue in &queues {
            assert!(Arc::ptr_eq(queue, &installed));
        }
    }

    #[test]
    fn concurrent_creators_of_distinct_topics_all_land() {
        let dir = TopicDirectory::new();
        std::thread::scope(|s| {
            for i in 0..32 {
                let dir = &dir;
                s.spawn(move || {
                    dir.get_or_create(&format!("t{i}")).lock().add("x");
                });
            }
        });
        assert_eq!(dir.len(), 32);
        assert_eq!(dir.list_non_empty().len(), 32);
    }

    #[test]
    fn replace_swaps_queue_object() {
        let dir = TopicDirectory::new();
        let old = dir.get_or_create("foo");
        old.lock().add("a");

        assert_eq!(dir.replace("foo", ["x", "y", "x"]), 2);
        let new = dir.get("foo").unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(new.snapshot(), vec!["x", "y"]);

        // Writes through the detached queue are invisible.
        old.lock().add("b");
        assert_eq!(dir.get("foo").unwrap().snapshot(), vec!["x", "y"]);
    }

    #[test]
    fn replace_with_nothing_leaves_empty_topic() {
        let dir = TopicDirectory::new();
        assert_eq!(dir.replace("foo", Vec::<String>::new()), 0);
        assert!(dir.get("foo").is_some());
        assert!(dir.list_non_empty().is_empty());
    }

    #[test]
    fn remove_detaches() {
        let dir = TopicDirectory::new();
        dir.replace("foo", ["a", "b"]);
        let removed = dir.remove("foo").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(dir.get("foo").is_none());
        assert!(dir.remove("foo").is_none());
    }

    #[test]
    fn clear_all_sums_and_empties() {
        let dir = TopicDirectory::new();
        dir.replace("foo", ["a", "b"]);
        dir.replace("bar", ["c", "d", "e"]);
        dir.get_or_create("empty");
        assert_eq!(dir.clear_all(), 5);
        assert!(dir.is_empty());
        assert!(dir.list_non_empty().is_empty());
        assert_eq!(dir.clear_all(), 0);
    }

    #[test]
    fn listing_hides_empty_topics() {
        let dir = TopicDirectory::new();
        dir.replace("b", ["1"]);
        dir.replace("a", ["1", "2"]);
        dir.get_or_create("c");
        assert_eq!(
            dir.list_non_empty(),
            vec![TopicCount::new("a", 2), TopicCount::new("b", 1)]
        );
        assert_eq!(dir.len(), 3);
    }
}
