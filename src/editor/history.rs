//! Bounded command history.

use std::collections::VecDeque;

/// Previously submitted command lines, oldest first.
///
/// Holds at most `capacity` entries; pushing beyond that drops the oldest.
/// Blank lines and immediate repeats are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    /// Create an empty history keeping up to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Record a submitted line.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if self.capacity == 0 || line.trim().is_empty() {
            return;
        }
        if self.entries.back() == Some(&line) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line);
    }

    /// Entry `age` steps back from the newest (0 is the newest).
    pub fn recent(&self, age: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(age + 1)?;
        self.entries.get(index).map(String::as_str)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}
