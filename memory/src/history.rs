//! # Bounded History
//!
//! A fixed-capacity FIFO ring of [`Exchange`]s. Pushing into a full history evicts the oldest
//! exchange first, so `len() <= capacity()` always holds and iteration is oldest → newest.
//!
//! ### Example
//!
//! ```rust
//! use memory::{BoundedHistory, Exchange};
//!
//! let mut history = BoundedHistory::new(2);
//! history.push(Exchange::new("q1", "a1"));
//! history.push(Exchange::new("q2", "a2"));
//! history.push(Exchange::new("q3", "a3"));
//!
//! let users: Vec<&str> = history.iter().map(|e| e.user.as_str()).collect();
//! assert_eq!(users, vec!["q2", "q3"]);
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::Exchange;

/// Number of exchanges remembered per chat unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Capped deque of exchanges, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedHistory {
    entries: VecDeque<Exchange>,
    capacity: usize,
}

impl BoundedHistory {
    /// Creates an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `exchange`, evicting the oldest entry first when full.
    /// Returns the evicted exchange, if any.
    pub fn push(&mut self, exchange: Exchange) -> Option<Exchange> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(exchange);
        evicted
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

    /// Oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for BoundedHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a BoundedHistory {
    type Item = &'a Exchange;
    type IntoIter = std::collections::vec_deque::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
