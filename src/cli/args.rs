//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--history-capacity <n>`: Override the undo history capacity
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// keytally - accumulate key=value batches with atomic groups and undo
#[derive(Parser, Debug)]
#[command(name = "kt")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of batches that can be undone
    #[arg(long, global = true, value_name = "N")]
    pub history_capacity: Option<NonZeroUsize>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Process batches and print the resulting store
    #[command(
        name = "eval",
        long_about = "Process each argument as one batch, optionally undo, then print the store.\n\n\
            A batch is a comma-separated list of key=value tokens. Numeric values \
            (matching -?[0-9]+) accumulate; anything else overwrites. Keys 441, 442 \
            and 500 form an atomic group and must all appear in the same batch.",
        after_help = "\
EXAMPLES:
    # Accumulate across batches
    kt eval 'one=1' 'Three=four, one=5'

    # Undo the last batch before printing
    kt eval 'one=1' 'Three=four, one=5' --undo 1

    # Machine-readable output
    kt eval 'pi=314159,hello=world' --json"
    )]
    Eval {
        /// Batches to process, in order
        #[arg(value_name = "BATCH")]
        batches: Vec<String>,

        /// Number of undo steps to apply after processing
        #[arg(long, default_value_t = 0, value_name = "N")]
        undo: usize,

        /// Print a JSON snapshot instead of key=value lines
        #[arg(long)]
        json: bool,
    },

    /// Read batches and commands from stdin
    #[command(
        name = "repl",
        long_about = "Read stdin line by line.\n\n\
            Each line is processed as one batch, except for the commands \
            `undo`, `display`, and `quit` / `exit`. Blank lines are ignored."
    )]
    Repl,

    /// Print the effective configuration
    #[command(name = "config")]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.",
        after_help = "\
INSTALLATION:
    # Bash (add to ~/.bashrc)
    eval \"$(kt completion bash)\"

    # Zsh (add to ~/.zshrc)
    eval \"$(kt completion zsh)\"

    # Fish
    kt completion fish > ~/.config/fish/completions/kt.fish

    # PowerShell
    kt completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
