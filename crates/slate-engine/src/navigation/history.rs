use std::collections::VecDeque;

/// Default number of remembered positions
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded stack of visited slide indices.
///
/// Pushing past capacity evicts the oldest entry; popping returns the newest.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<usize>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, index: usize) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}
