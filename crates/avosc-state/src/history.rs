//! Bounded FIFO history
//!
//! Values are kept oldest-first, most recent last. Once the bound is reached
//! every push evicts exactly the oldest value.

use std::collections::VecDeque;

/// Bounded value history (most recent last)
#[derive(Clone, Debug, PartialEq)]
pub struct History<T> {
    values: VecDeque<T>,
    max_len: usize,
}

impl<T> History<T> {
    /// Create an empty history holding at most `max_len` values.
    ///
    /// A bound of zero is raised to one.
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        History {
            values: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Append a value, returning the evicted oldest value if at capacity
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.values.len() == self.max_len {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    #[inline]
    pub fn latest(&self) -> Option<&T> {
        self.values.back()
    }

    #[inline]
    pub fn oldest(&self) -> Option<&T> {
        self.values.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == self.max_len
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Clone> History<T> {
    /// Copy out the values, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}
