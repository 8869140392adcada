//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and the stderr notifier
//!
//! # Design
//!
//! All terminal output goes through this module so that quiet mode and
//! error formatting are handled in one place.

pub mod output;
