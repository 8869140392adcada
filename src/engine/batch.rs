//! engine::batch
//!
//! Parses one input batch and applies it to the ledger.
//!
//! # Input Format
//!
//! A batch is a comma-separated list of `key=value` tokens:
//!
//! ```text
//! 14=15, 14=7,A=B52, 14 = 4, dry = Don't Repeat Yourself
//! ```
//!
//! - Empty input has no tokens, and trailing empty tokens are ignored
//! - A token must contain exactly one `=` with something after it
//! - Keys and values are trimmed of surrounding whitespace
//!
//! # Error Recovery
//!
//! A bad token or an incomplete atomic group is reported to the notifier and
//! skipped; every other token in the batch still applies. Processing a batch
//! never fails.

use tracing::trace;

use crate::core::ledger::Ledger;
use crate::core::ops::delta::{Delta, DeltaBuilder};

use super::atomic::{AtomicGroupTracker, Offer};
use super::errors::BatchError;
use super::notify::{report, Notifier};

/// Result of processing one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Before-images of every key the batch touched.
    pub delta: Delta,
    /// Number of tokens seen.
    pub tokens: usize,
    /// Number of errors reported.
    pub errors: usize,
}

/// Split a batch into raw tokens.
///
/// Trailing empty tokens are dropped, so `""` and `","` yield nothing and
/// `"a=1,"` yields one token. Interior empty tokens are kept so that they
/// can be reported as malformed.
pub fn tokens(input: &str) -> impl Iterator<Item = &str> {
    let body = input.trim_end_matches(',');
    body.split(',').filter(move |_| !body.is_empty())
}

/// Parse a raw token into a trimmed `(key, value)` pair.
///
/// # Errors
///
/// Returns [`BatchError::InvalidFormat`] if the token does not contain exactly
/// one `=`, or if nothing follows the `=`.
pub fn parse_pair(token: &str) -> Result<(&str, &str), BatchError> {
    let mut parts = token.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !value.is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(BatchError::InvalidFormat {
            token: token.to_string(),
        }),
    }
}

/// Drives one batch against a ledger.
pub struct BatchProcessor<'a, N: Notifier + ?Sized> {
    ledger: &'a mut Ledger,
    notifier: &'a N,
    group: AtomicGroupTracker,
    delta: DeltaBuilder,
    errors: usize,
}

impl<'a, N: Notifier + ?Sized> BatchProcessor<'a, N> {
    /// Start a batch with an empty delta and a fresh atomic group.
    pub fn new(ledger: &'a mut Ledger, notifier: &'a N) -> Self {
        Self {
            ledger,
            notifier,
            group: AtomicGroupTracker::new(),
            delta: DeltaBuilder::new(),
            errors: 0,
        }
    }

    /// Apply every token in `input` and return the batch's delta.
    pub fn process(mut self, input: &str) -> BatchOutcome {
        let mut count = 0;
        for token in tokens(input) {
            count += 1;
            self.apply_token(token);
        }

        if let Some(err) = self.group.finalize_incomplete() {
            self.fail(err);
        }

        BatchOutcome {
            delta: self.delta.finish(),
            tokens: count,
            errors: self.errors,
        }
    }

    fn apply_token(&mut self, token: &str) {
        let (key, value) = match parse_pair(token) {
            Ok(pair) => pair,
            Err(err) => return self.fail(err),
        };

        match self.group.offer(key, value) {
            Ok(Offer::NotGrouped) => self.merge(key, value),
            Ok(Offer::Pending) => trace!(key, "buffered atomic group value"),
            Ok(Offer::Complete(pairs)) => {
                for (key, value) in &pairs {
                    self.merge(key, value);
                }
            }
            Err(err) => self.fail(err),
        }
    }

    fn merge(&mut self, key: &str, value: &str) {
        self.delta.record(self.ledger, key);
        match self.ledger.merge(key, value) {
            Ok(outcome) => trace!(key, value, ?outcome, "merged"),
            Err(err) => self.fail(err.into()),
        }
    }

    fn fail(&mut self, err: BatchError) {
        trace!(kind = err.kind(), "rejected");
        self.errors += 1;
        report(self.notifier, &err);
    }
}
