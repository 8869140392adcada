//! engine::errors
//!
//! Recoverable errors raised while processing a batch.
//!
//! None of these abort a batch. Each is scoped to one token or one atomic
//! group, is handed to the [`Notifier`](super::notify::Notifier), and the
//! batch carries on with the next token.

use thiserror::Error;

use crate::core::ledger::{LedgerError, OverflowCause};

use super::atomic::ATOMIC_KEYS;

/// A recoverable per-token or per-group error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The token is not a single `key=value` pair.
    #[error("Invalid format.")]
    InvalidFormat {
        /// The raw, untrimmed token.
        token: String,
    },

    /// A group key was assigned twice before the group completed.
    #[error(
        "Key {key} is overlapping in the atomic group ({group}).",
        group = ATOMIC_KEYS.join(", ")
    )]
    AtomicGroupOverlap {
        /// The repeated key.
        key: String,
    },

    /// The batch ended with the atomic group partially filled.
    #[error(
        "atomic group({group}) missing {missing}",
        group = ATOMIC_KEYS.join(","),
        missing = .missing.join(",")
    )]
    AtomicGroupIncomplete {
        /// Keys never supplied, in group order.
        missing: Vec<&'static str>,
    },

    /// Numeric accumulation left the 32-bit signed range.
    #[error("The integer value overflows.")]
    IntegerOverflow {
        /// Key whose merge was skipped.
        key: String,
        /// Underlying parse or arithmetic failure.
        #[source]
        source: OverflowCause,
    },
}

impl From<LedgerError> for BatchError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::IntegerOverflow { key, source } => {
                BatchError::IntegerOverflow { key, source }
            }
        }
    }
}

impl BatchError {
    /// Short, stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            BatchError::InvalidFormat { .. } => "invalid_format",
            BatchError::AtomicGroupOverlap { .. } => "atomic_group_overlap",
            BatchError::AtomicGroupIncomplete { .. } => "atomic_group_incomplete",
            BatchError::IntegerOverflow { .. } => "integer_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages() {
        assert_eq!(
            BatchError::InvalidFormat {
                token: "abc".to_string()
            }
            .to_string(),
            "Invalid format."
        );
        assert_eq!(
            BatchError::AtomicGroupOverlap {
                key: "442".to_string()
            }
            .to_string(),
            "Key 442 is overlapping in the atomic group (441, 442, 500)."
        );
        assert_eq!(
            BatchError::AtomicGroupIncomplete {
                missing: vec!["441", "500"]
            }
            .to_string(),
            "atomic group(441,442,500) missing 441,500"
        );
    }

    #[test]
    fn only_overflow_carries_a_cause() {
        let overflow: BatchError = LedgerError::IntegerOverflow {
            key: "A".to_string(),
            source: OverflowCause::Sum { lhs: 1, rhs: 2 },
        }
        .into();
        assert!(overflow.source().is_some());
        assert_eq!(overflow.kind(), "integer_overflow");

        let invalid = BatchError::InvalidFormat {
            token: String::new(),
        };
        assert!(invalid.source().is_none());
    }
}
