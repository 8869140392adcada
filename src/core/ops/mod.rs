//! core::ops
//!
//! Per-batch change records and the undo history built from them.
//!
//! # Modules
//!
//! - [`delta`] - Before-images of the keys one batch touched
//! - [`history`] - Fixed-capacity ring buffer of deltas
//!
//! # Architecture
//!
//! Every batch:
//! 1. Starts an empty [`DeltaBuilder`]
//! 2. Records each key's before-image on first touch
//! 3. Seals the delta and pushes it onto the [`UndoHistory`]
//!
//! Undo pops the newest delta and reverts it against the ledger.

pub mod delta;
pub mod history;

pub use delta::{Delta, DeltaBuilder, DeltaEntry};
pub use history::{UndoHistory, DEFAULT_CAPACITY};
