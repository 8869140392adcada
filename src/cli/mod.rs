//! cli
//!
//! Command-line interface layer for keytally.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and install logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves the
//! effective [`Config`], and dispatches to [`commands`], which drive a
//! [`crate::engine::KeyTally`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{anyhow, Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Environment variable that overrides every other log filter.
pub const LOG_ENV: &str = "KEYTALLY_LOG";

/// Shared state for command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration (file + CLI overrides).
    pub config: Config,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(capacity) = cli.history_capacity {
        config = config.with_history_capacity(capacity);
    }

    init_logging(&config, cli.debug)?;

    let ctx = Context {
        config,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the global tracing subscriber.
///
/// `KEYTALLY_LOG` wins, then `--debug`, then the config's `log_filter`,
/// then `keytally=warn`.
fn init_logging(config: &Config, debug: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => {
            let directives = if debug {
                "keytally=debug"
            } else {
                config.log_filter().unwrap_or("keytally=warn")
            };
            EnvFilter::try_new(directives)
                .with_context(|| format!("Invalid log filter '{directives}'"))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}
