//! engine
//!
//! Batch processing, atomic groups, and undo over a single ledger.
//!
//! # Architecture
//!
//! [`KeyTally`] owns the [`Ledger`], the [`UndoHistory`] and the injected
//! [`Notifier`]. Every call to [`KeyTally::process`] runs one batch:
//!
//! ```text
//! process(input)
//!   -> BatchProcessor: tokenize, merge, buffer atomic group, build delta
//!   -> UndoHistory::push(delta)        (even when the delta is empty)
//!
//! undo()
//!   -> UndoHistory::pop() -> Delta::revert(ledger)
//! ```
//!
//! # Invariants
//!
//! - Exactly one history entry is pushed per `process` call
//! - Errors are reported, never returned; `process` always completes
//! - Atomic group state never outlives a single `process` call
//!
//! # Concurrency
//!
//! `KeyTally` is single-threaded. Callers that need shared access must
//! serialize around the whole value.
//!
//! # Example
//!
//! ```
//! use keytally::engine::{KeyTally, RecordingNotifier};
//!
//! let mut kv = KeyTally::new(RecordingNotifier::new());
//! kv.process("one=1");
//! kv.process("Three=four, one=5");
//! assert_eq!(kv.render(), "one=6\nThree=four");
//!
//! kv.undo();
//! assert_eq!(kv.render(), "one=1");
//! assert!(kv.notifier().is_empty());
//! ```

pub mod atomic;
pub mod batch;
pub mod errors;
pub mod notify;

pub use atomic::{AtomicGroupTracker, Offer, ATOMIC_KEYS};
pub use batch::{BatchOutcome, BatchProcessor};
pub use errors::BatchError;
pub use notify::{Notifier, RecordingNotifier, Report, TracingNotifier};

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::Config;
use crate::core::ledger::Ledger;
use crate::core::ops::history::UndoHistory;

/// One `key=value` pair in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub value: String,
}

/// Serializable view of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Entries in display order.
    pub entries: Vec<SnapshotEntry>,
    /// Number of batches that can currently be undone.
    pub history_depth: usize,
}

/// The key/value accumulator.
#[derive(Debug)]
pub struct KeyTally<N: Notifier = TracingNotifier> {
    ledger: Ledger,
    history: UndoHistory,
    notifier: N,
}

impl Default for KeyTally<TracingNotifier> {
    fn default() -> Self {
        Self::new(TracingNotifier)
    }
}

impl<N: Notifier> KeyTally<N> {
    /// Create an empty store with the default history capacity.
    pub fn new(notifier: N) -> Self {
        Self::with_capacity(notifier, crate::core::ops::DEFAULT_CAPACITY)
    }

    /// Create an empty store that can undo at most `capacity` batches.
    pub fn with_capacity(notifier: N, capacity: NonZeroUsize) -> Self {
        Self {
            ledger: Ledger::new(),
            history: UndoHistory::new(capacity),
            notifier,
        }
    }

    /// Create an empty store sized from `config`.
    pub fn from_config(notifier: N, config: &Config) -> Self {
        Self::with_capacity(notifier, config.history_capacity())
    }

    /// Process one batch of comma-separated `key=value` tokens.
    ///
    /// Malformed tokens, atomic group errors and overflows are reported to
    /// the notifier; everything else in the batch still applies. One undo
    /// history entry is always pushed, even for an empty batch.
    pub fn process(&mut self, input: &str) {
        let outcome = BatchProcessor::new(&mut self.ledger, &self.notifier).process(input);
        let touched = outcome.delta.len();
        self.history.push(outcome.delta);

        debug!(
            tokens = outcome.tokens,
            touched,
            errors = outcome.errors,
            history_depth = self.history.len(),
            "batch processed"
        );
    }

    /// Revert the most recent batch still in history.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(delta) = self.history.pop() else {
            debug!("undo requested with empty history");
            return false;
        };
        delta.revert(&mut self.ledger);
        debug!(
            restored = delta.len(),
            history_depth = self.history.len(),
            "undo applied"
        );
        true
    }

    /// Render the store as newline-joined `key=value` lines.
    pub fn render(&self) -> String {
        self.ledger.render()
    }

    /// Serializable view of the store and history depth.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .ledger
                .iter()
                .map(|(key, value)| SnapshotEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            history_depth: self.history.len(),
        }
    }

    /// The underlying ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The undo history.
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// The injected notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
