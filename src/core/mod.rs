//! core
//!
//! Domain types, the key/value ledger, and its change records.
//!
//! # Modules
//!
//! - [`types`] - Numeric vs. text value classification
//! - [`ledger`] - The key/value store and its merge rules
//! - [`ops`] - Per-batch deltas and the bounded undo history
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The ledger knows nothing about batches, parsing, or error reporting
//! - Every mutation a batch makes is reversible from its delta alone

pub mod config;
pub mod ledger;
pub mod ops;
pub mod types;
