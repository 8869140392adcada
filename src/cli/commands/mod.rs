//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds a [`crate::engine::KeyTally`] from the effective configuration
//! 2. Feeds it batches and undo requests
//! 3. Formats and displays output
//!
//! Handlers never touch the ledger directly.

mod completion;
mod config_cmd;
mod eval;
mod repl;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::config;
pub use eval::eval;
pub use repl::repl;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Eval {
            batches,
            undo,
            json,
        } => eval::eval(ctx, &batches, undo, json),
        Command::Repl => repl::repl(ctx),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
