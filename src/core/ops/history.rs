//! core::ops::history
//!
//! Bounded undo history.
//!
//! [`UndoHistory`] keeps the most recent deltas in a `VecDeque`, oldest at
//! the front. Pushing past capacity evicts from the front; undo pops from
//! the back.
//!
//! ```text
//! capacity = 3
//!
//! push(d4)
//! ┌──────────────────────────────┐
//! │ [d1, d2, d3] -> [d2, d3, d4] │   d1 evicted
//! └──────────────────────────────┘
//!
//! pop()
//! ┌──────────────────────────────┐
//! │ [d2, d3, d4] -> [d2, d3]     │   d4 returned
//! └──────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! - `len() <= capacity()` after every operation
//! - Capacity is at least one

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use tracing::debug;

use super::delta::Delta;

/// Default number of batches that can be undone.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Fixed-capacity ring buffer of batch deltas.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    deltas: VecDeque<Delta>,
    capacity: NonZeroUsize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl UndoHistory {
    /// Create an empty history holding at most `capacity` deltas.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            deltas: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Append a delta, evicting the oldest if the history is full.
    ///
    /// Returns the evicted delta, if any.
    pub fn push(&mut self, delta: Delta) -> Option<Delta> {
        let evicted = if self.deltas.len() >= self.capacity.get() {
            self.deltas.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!(
                capacity = self.capacity.get(),
                evicted_keys = old.len(),
                "undo history full, evicted oldest delta"
            );
        }
        self.deltas.push_back(delta);
        evicted
    }

    /// Remove and return the newest delta.
    pub fn pop(&mut self) -> Option<Delta> {
        self.deltas.pop_back()
    }

    /// Peek at the newest delta.
    pub fn last(&self) -> Option<&Delta> {
        self.deltas.back()
    }

    /// Check if there is anything to undo.
    pub fn has_entries(&self) -> bool {
        !self.deltas.is_empty()
    }

    /// Number of stored deltas.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Maximum number of stored deltas.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Iterate deltas oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Delta> {
        self.deltas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::Ledger;
    use crate::core::ops::delta::DeltaBuilder;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn delta_for(key: &str) -> Delta {
        let mut builder = DeltaBuilder::new();
        builder.record(&Ledger::new(), key);
        builder.finish()
    }

    #[test]
    fn default_capacity_is_256() {
        assert_eq!(UndoHistory::default().capacity(), 256);
    }

    #[test]
    fn starts_empty() {
        let mut history = UndoHistory::new(capacity(2));
        assert!(!history.has_entries());
        assert!(history.pop().is_none());
    }

    #[test]
    fn pop_is_lifo() {
        let mut history = UndoHistory::new(capacity(4));
        history.push(delta_for("a"));
        history.push(delta_for("b"));
        assert_eq!(history.pop(), Some(delta_for("b")));
        assert_eq!(history.pop(), Some(delta_for("a")));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn push_past_capacity_evicts_oldest() {
        let mut history = UndoHistory::new(capacity(2));
        assert_eq!(history.push(delta_for("a")), None);
        assert_eq!(history.push(delta_for("b")), None);
        assert_eq!(history.push(delta_for("c")), Some(delta_for("a")));
        assert_eq!(history.len(), 2);

        let keys: Vec<_> = history
            .iter()
            .map(|d| d.entries()[0].key.clone())
            .collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn empty_deltas_occupy_slots() {
        let mut history = UndoHistory::new(capacity(3));
        for _ in 0..3 {
            history.push(Delta::default());
        }
        assert_eq!(history.len(), 3);
        assert!(history.last().is_some_and(Delta::is_empty));
    }

    #[test]
    fn capacity_of_one_keeps_only_newest() {
        let mut history = UndoHistory::new(capacity(1));
        history.push(delta_for("a"));
        history.push(delta_for("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.last(), Some(&delta_for("b")));
    }
}
