//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$KEYTALLY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/keytally/config.toml`
//! 3. `~/.keytally/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing; a zero history capacity or an empty
//! log filter is rejected.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// On-disk configuration.
///
/// # Example
///
/// ```toml
/// history_capacity = 64
/// log_filter = "keytally=debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum number of undoable batches
    pub history_capacity: Option<usize>,

    /// `tracing_subscriber::EnvFilter` directives for the `kt` binary
    pub log_filter: Option<String>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == Some(0) {
            return Err(ConfigError::InvalidValue(
                "history_capacity must be at least 1".to_string(),
            ));
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "log_filter cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
