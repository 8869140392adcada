//! core::ledger
//!
//! The key/value store and its merge rules.
//!
//! # Storage
//!
//! Keys are stored case-sensitively but ordered case-insensitively. Every
//! entry lives in a single `BTreeMap` keyed by [`OrderKey`], which pairs the
//! case-folded key with the original key. This makes the stored mapping and
//! the display order the same structure, so a key can never be present in
//! one and missing from the other. Keys that differ only by case compare
//! equal on the folded half and fall back to byte order on the original.
//! Folding maps each char to upper case and then lower case, which also
//! groups non-ASCII variants such as `ſ` with `s`.
//!
//! # Merge Rules
//!
//! | Stored    | Incoming  | Result                         |
//! |-----------|-----------|--------------------------------|
//! | absent    | any       | insert                         |
//! | numeric   | numeric   | 32-bit signed sum              |
//! | otherwise | otherwise | overwrite                      |
//!
//! A sum that leaves the `i32` range, or an operand that is already outside
//! it, aborts the merge and leaves the stored value untouched.
//!
//! # Example
//!
//! ```
//! use keytally::core::ledger::Ledger;
//!
//! let mut ledger = Ledger::new();
//! ledger.merge("one", "1").unwrap();
//! ledger.merge("Three", "four").unwrap();
//! ledger.merge("one", "5").unwrap();
//! assert_eq!(ledger.render(), "one=6\nThree=four");
//! ```

use std::collections::BTreeMap;
use std::num::ParseIntError;

use thiserror::Error;

use crate::core::types::ValueKind;

/// Errors from ledger merges.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Numeric accumulation left the 32-bit signed range.
    #[error("The integer value overflows.")]
    IntegerOverflow {
        /// Key whose merge was aborted.
        key: String,
        /// What overflowed.
        #[source]
        source: OverflowCause,
    },
}

/// The underlying failure behind [`LedgerError::IntegerOverflow`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverflowCause {
    /// One of the operands does not fit in an `i32`.
    #[error("operand out of 32-bit signed range: {0}")]
    Operand(#[from] ParseIntError),

    /// Both operands fit but their sum does not.
    #[error("{lhs} + {rhs} exceeds the 32-bit signed range")]
    Sum { lhs: i32, rhs: i32 },
}

/// What a successful merge did to the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The key was absent and has been inserted.
    Inserted,
    /// Both values were numeric and have been summed.
    Accumulated,
    /// The stored value was replaced.
    Overwritten,
}

/// Sort key: case-folded key first, original key as tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey {
    folded: String,
    key: String,
}

impl OrderKey {
    fn new(key: &str) -> Self {
        Self {
            folded: fold_case(key),
            key: key.to_string(),
        }
    }
}

/// The primary key/value store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<OrderKey, String>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `value` into `key` under the accumulation rules.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IntegerOverflow`] when both values are numeric
    /// and either operand or their sum is outside the `i32` range. The stored
    /// value is unchanged in that case.
    pub fn merge(&mut self, key: &str, value: &str) -> Result<MergeOutcome, LedgerError> {
        let order = OrderKey::new(key);
        let Some(current) = self.entries.get_mut(&order) else {
            self.entries.insert(order, value.to_string());
            return Ok(MergeOutcome::Inserted);
        };

        if ValueKind::of(current).is_numeric() && ValueKind::of(value).is_numeric() {
            let sum = checked_sum(current, value).map_err(|source| LedgerError::IntegerOverflow {
                key: key.to_string(),
                source,
            })?;
            *current = sum.to_string();
            Ok(MergeOutcome::Accumulated)
        } else {
            *current = value.to_string();
            Ok(MergeOutcome::Overwritten)
        }
    }

    /// Set `key` to exactly `value`, bypassing accumulation.
    pub fn overwrite(&mut self, key: &str, value: &str) {
        self.entries.insert(OrderKey::new(key), value.to_string());
    }

    /// Get the stored value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&OrderKey::new(key)).map(String::as_str)
    }

    /// Remove `key`. No-op if absent.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(&OrderKey::new(key));
    }

    /// Check if `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&OrderKey::new(key))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(order, value)| (order.key.as_str(), value.as_str()))
    }

    /// Render the store as newline-joined `key=value` lines.
    ///
    /// Keys are in case-insensitive ascending order. There is no trailing
    /// newline, and an empty ledger renders as the empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

/// Per-char upper-then-lower case fold.
fn fold_case(key: &str) -> String {
    key.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

fn checked_sum(lhs: &str, rhs: &str) -> Result<i32, OverflowCause> {
    let lhs: i32 = lhs.parse()?;
    let rhs: i32 = rhs.parse()?;
    lhs.checked_add(rhs).ok_or(OverflowCause::Sum { lhs, rhs })
}
