//! Ordered unique collection of lines.
//!
//! [`LineSet`] keeps each line at most once and iterates in insertion order.
//! It sits on a hash-linked set, so add, remove, contains and popping the
//! oldest line are all O(1), and removing a line never reorders the
//! survivors.
//!
//! The type is a plain data structure with no interior locking. Callers that
//! share a set across threads wrap it in a lock (see [`crate::Queue`]).

use hashlink::LinkedHashSet;

/// An insertion-ordered set of text lines.
#[derive(Clone, Debug, Default)]
pub struct LineSet {
    lines: LinkedHashSet<String>,
}

impl LineSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `line` at the tail if it is not already present.
    ///
    /// Returns `true` if the line was newly inserted. A line that is already
    /// present keeps its position.
    pub fn add(&mut self, line: &str) -> bool {
        if self.lines.contains(line) {
            return false;
        }
        self.lines.insert(line.to_owned())
    }

    /// Remove `line` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, line: &str) -> bool {
        self.lines.remove(line)
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    /// Remove every line and return how many there were.
    pub fn clear(&mut self) -> usize {
        let prior = self.len();
        self.lines.clear();
        prior
    }

    /// Remove and return the earliest-inserted line.
    pub fn pop_front(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Copy the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for line in iter {
            set.add(line.as_ref());
        }
        set
    }
}
