//! keytally - An in-memory key/value accumulator with atomic groups and undo
//!
//! keytally parses comma-separated `key=value` batches and merges them into a
//! store: numeric values accumulate as 32-bit integers, anything else
//! overwrites. Keys `441`, `442` and `500` form an atomic group that must be
//! supplied together. Every batch can be undone from a bounded history.
//!
//! # Architecture
//!
//! - [`core`] - Ledger, value classification, deltas, undo history, config
//! - [`engine`] - Batch parsing, atomic groups, notifier, the [`KeyTally`] facade
//! - [`cli`] - Command-line interface for the `kt` binary
//! - [`ui`] - Terminal output helpers
//!
//! # Correctness Invariants
//!
//! 1. Every stored key appears exactly once in display order
//! 2. Each batch pushes exactly one reversible delta
//! 3. Errors are reported per token and never abort a batch
//! 4. An incomplete atomic group commits nothing
//!
//! [`KeyTally`]: engine::KeyTally

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
