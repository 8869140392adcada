//! core::ops::delta
//!
//! Before-images of one batch.
//!
//! A [`Delta`] holds, for every distinct key a batch touched, the value that
//! key had before the batch began (or `None` if it did not exist). Replaying
//! a delta restores the ledger to its pre-batch state for those keys and
//! leaves every other key alone.
//!
//! # Invariants
//!
//! - One entry per distinct key, in first-touch order
//! - A key touched several times in one batch keeps its *first* before-image
//! - Entries are append-only while the batch is being built
//!
//! # Example
//!
//! ```
//! use keytally::core::ledger::Ledger;
//! use keytally::core::ops::delta::DeltaBuilder;
//!
//! let mut ledger = Ledger::new();
//! ledger.merge("one", "1").unwrap();
//!
//! let mut builder = DeltaBuilder::new();
//! builder.record(&ledger, "one");
//! ledger.merge("one", "5").unwrap();
//! builder.record(&ledger, "one");
//! builder.record(&ledger, "Three");
//! ledger.merge("Three", "four").unwrap();
//!
//! let delta = builder.finish();
//! delta.revert(&mut ledger);
//! assert_eq!(ledger.render(), "one=1");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::ledger::Ledger;

/// The before-image of a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEntry {
    /// The key that was touched.
    pub key: String,
    /// Value before the batch, or None if the key was absent.
    pub prior: Option<String>,
}

/// Reversible record of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    entries: Vec<DeltaEntry>,
}

impl Delta {
    /// Entries in first-touch order.
    pub fn entries(&self) -> &[DeltaEntry] {
        &self.entries
    }

    /// Number of keys this delta restores.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the batch touched no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restore every recorded key to its before-image.
    ///
    /// Absent before-images remove the key; present ones are written back
    /// verbatim with [`Ledger::overwrite`], never accumulated.
    pub fn revert(&self, ledger: &mut Ledger) {
        for entry in &self.entries {
            match &entry.prior {
                Some(value) => ledger.overwrite(&entry.key, value),
                None => ledger.remove(&entry.key),
            }
        }
    }
}

/// Accumulates a [`Delta`] while a batch runs.
#[derive(Debug, Default)]
pub struct DeltaBuilder {
    entries: Vec<DeltaEntry>,
    seen: HashSet<String>,
}

impl DeltaBuilder {
    /// Start an empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `key` from `ledger` unless it was already recorded.
    ///
    /// Must be called before the first mutation of `key` in the batch.
    pub fn record(&mut self, ledger: &Ledger, key: &str) {
        if self.seen.insert(key.to_string()) {
            self.entries.push(DeltaEntry {
                key: key.to_string(),
                prior: ledger.get(key).map(str::to_string),
            });
        }
    }

    /// Number of keys recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seal the delta.
    pub fn finish(self) -> Delta {
        Delta {
            entries: self.entries,
        }
    }
}
