//! engine::atomic
//!
//! The atomic key group.
//!
//! Keys `441`, `442` and `500` must be supplied together within one batch.
//! The tracker buffers their values until all three have arrived, then hands
//! the complete triple back in group order so the caller can merge it. A
//! group left incomplete at the end of the batch is discarded and reported.
//!
//! Once a group completes, the slots clear and a second instance of the group
//! may follow in the same batch.

use super::errors::BatchError;

/// Keys that must be supplied together, in flush order.
pub const ATOMIC_KEYS: [&str; 3] = ["441", "442", "500"];

/// What happened to an offered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// Not a group key; the caller merges it directly.
    NotGrouped,
    /// Buffered (or ignored if empty); the group is still incomplete.
    Pending,
    /// The group is complete. Pairs are in [`ATOMIC_KEYS`] order.
    Complete([(&'static str, String); 3]),
}

/// Per-batch pending values for the atomic group.
#[derive(Debug, Default)]
pub struct AtomicGroupTracker {
    slots: [Option<String>; 3],
}

impl AtomicGroupTracker {
    /// Create a tracker with all slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any slot is filled.
    pub fn is_pending(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// Clear all slots.
    pub fn reset(&mut self) {
        self.slots = Default::default();
    }

    /// Offer a trimmed `key`/`value` pair.
    ///
    /// An empty value leaves its slot open, so it neither completes the group
    /// nor blocks a later value for the same key.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::AtomicGroupOverlap`] if the key's slot is already
    /// filled. The first value is kept and this one is dropped.
    pub fn offer(&mut self, key: &str, value: &str) -> Result<Offer, BatchError> {
        let Some(index) = ATOMIC_KEYS.iter().position(|k| *k == key) else {
            return Ok(Offer::NotGrouped);
        };

        if self.slots[index].is_some() {
            return Err(BatchError::AtomicGroupOverlap {
                key: key.to_string(),
            });
        }
        if value.is_empty() {
            return Ok(Offer::Pending);
        }
        self.slots[index] = Some(value.to_string());

        match std::mem::take(&mut self.slots) {
            [Some(first), Some(second), Some(third)] => Ok(Offer::Complete([
                (ATOMIC_KEYS[0], first),
                (ATOMIC_KEYS[1], second),
                (ATOMIC_KEYS[2], third),
            ])),
            pending => {
                self.slots = pending;
                Ok(Offer::Pending)
            }
        }
    }

    /// Close the batch.
    ///
    /// Returns [`BatchError::AtomicGroupIncomplete`] listing the unfilled
    /// keys in group order if the group was partially filled. Pending values
    /// are discarded either way.
    pub fn finalize_incomplete(&mut self) -> Option<BatchError> {
        if !self.is_pending() {
            return None;
        }
        let missing = ATOMIC_KEYS
            .iter()
            .zip(&self.slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(key, _)| *key)
            .collect();
        self.reset();
        Some(BatchError::AtomicGroupIncomplete { missing })
    }
}
