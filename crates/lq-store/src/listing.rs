//! Index projection: which topics hold lines, and how many.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::queue::Queue;

/// A topic and the number of lines it held when listed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

impl TopicCount {
    pub fn new(topic: impl Into<String>, count: usize) -> Self {
        Self {
            topic: topic.into(),
            count,
        }
    }
}

impl fmt::Display for TopicCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.topic, self.count)
    }
}

/// Project a directory snapshot into non-empty topics sorted by name.
///
/// Each size is taken under that queue's own lock, one queue at a time.
pub(crate) fn project(topics: &HashMap<String, Arc<Queue>>) -> Vec<TopicCount> {
    let mut listing: Vec<TopicCount> = topics
        .iter()
        .filter_map(|(topic, queue)| {
            let count = queue.len();
            (count > 0).then(|| TopicCount::new(topic.as_str(), count))
        })
        .collect();
    listing.sort_by(|a, b| a.topic.cmp(&b.topic));
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_topic_then_count() {
        assert_eq!(TopicCount::new("foo", 3).to_string(), "foo 3");
    }

    #[test]
    fn project_skips_empty_and_sorts() {
        let mut topics = HashMap::new();
        topics.insert("zeta".to_string(), Arc::new(Queue::from_lines(["1"])));
        topics.insert("alpha".to_string(), Arc::new(Queue::from_lines(["1", "2"])));
        topics.insert("empty".to_string(), Arc::new(Queue::new()));
        topics.insert("Beta".to_string(), Arc::new(Queue::from_lines(["x"])));

        let listing = project(&topics);
        assert_eq!(
            listing,
            vec![
                TopicCount::new("Beta", 1),
                TopicCount::new("alpha", 2),
                TopicCount::new("zeta", 1),
            ]
        );
    }

    #[test]
    fn project_of_nothing_is_empty() {
        assert!(project(&HashMap::new()).is_empty());
    }
}
