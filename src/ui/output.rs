//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Store
//! contents go to stdout; reported batch errors and diagnostics go to stderr.

use std::error::Error;
use std::fmt::Display;

use crate::engine::Notifier;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a reported error and its cause for the terminal.
pub fn format_report(message: &str, cause: Option<&dyn Display>) -> String {
    match cause {
        Some(cause) => format!("{message}\n  caused by: {cause}"),
        None => message.to_string(),
    }
}

/// Prints every reported batch error to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn on_error(&self, message: &str) {
        error(format_report(message, None));
    }

    fn on_error_with_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        error(format_report(message, Some(&cause)));
    }
}
