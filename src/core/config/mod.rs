//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$KEYTALLY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/keytally/config.toml`
//! 3. `~/.keytally/config.toml`
//!
//! An explicitly requested file (`kt --config <path>`) must exist.
//!
//! # Example
//!
//! ```no_run
//! use keytally::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("history capacity: {}", config.history_capacity());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::ops::history::DEFAULT_CAPACITY;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KEYTALLY_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: '{0}'")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    file: ConfigFile,
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// If `explicit` is given, that file is read and must exist. Otherwise the
    /// standard locations are searched and defaults are used when none exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::from_file(path);
        }

        match Self::locate(|name| std::env::var(name).ok(), dirs::home_dir()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read, parse, and validate a single config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file among the standard locations.
    pub(crate) fn locate(
        env: impl Fn(&str) -> Option<String>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        let candidates = [
            env(CONFIG_ENV).map(PathBuf::from),
            env("XDG_CONFIG_HOME").map(|xdg| PathBuf::from(xdg).join("keytally/config.toml")),
            home.map(|home| home.join(".keytally/config.toml")),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }

    /// Override the history capacity (e.g. from a CLI flag).
    pub fn with_history_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.file.history_capacity = Some(capacity.get());
        self
    }

    /// Maximum number of undoable batches.
    pub fn history_capacity(&self) -> NonZeroUsize {
        self.file
            .history_capacity
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_CAPACITY)
    }

    /// Configured log filter directives, if any.
    pub fn log_filter(&self) -> Option<&str> {
        self.file.log_filter.as_deref()
    }

    /// The file this configuration was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let effective = ConfigFile {
            history_capacity: Some(self.history_capacity().get()),
            log_filter: self.file.log_filter.clone(),
        };
        toml::to_string_pretty(&effective).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.history_capacity().get(), 256);
        assert!(config.log_filter().is_none());
        assert!(config.path().is_none());
    }

    #[test]
    fn from_file_reads_values() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "config.toml", "history_capacity = 3\n");

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.history_capacity().get(), 3);
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn from_file_rejects_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "config.toml", "history_capacity = \"many\"");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn from_file_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "config.toml", "history_capacity = 0");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn locate_prefers_env_var() {
        let temp = TempDir::new().unwrap();
        let explicit = write(&temp, "explicit.toml", "");
        let xdg = write(&temp, "xdg/keytally/config.toml", "");
        write(&temp, "home/.keytally/config.toml", "");

        let explicit_str = explicit.to_string_lossy().into_owned();
        let xdg_root = temp.path().join("xdg").to_string_lossy().into_owned();
        let found = Config::locate(
            |name| match name {
                CONFIG_ENV => Some(explicit_str.clone()),
                "XDG_CONFIG_HOME" => Some(xdg_root.clone()),
                _ => None,
            },
            Some(temp.path().join("home")),
        );
        assert_eq!(found, Some(explicit));

        let found = Config::locate(
            |name| (name == "XDG_CONFIG_HOME").then(|| xdg_root.clone()),
            Some(temp.path().join("home")),
        );
        assert_eq!(found, Some(xdg));
    }

    #[test]
    fn locate_falls_back_to_home() {
        let temp = TempDir::new().unwrap();
        let home_config = write(&temp, "home/.keytally/config.toml", "");

        let found = Config::locate(|_| None, Some(temp.path().join("home")));
        assert_eq!(found, Some(home_config));
    }

    #[test]
    fn locate_skips_missing_files() {
        let temp = TempDir::new().unwrap();
        let found = Config::locate(
            |_| Some(temp.path().join("absent").to_string_lossy().into_owned()),
            None,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn cli_override_wins() {
        let config = Config::default().with_history_capacity(NonZeroUsize::new(5).unwrap());
        assert_eq!(config.history_capacity().get(), 5);
    }

    #[test]
    fn to_toml_reports_effective_values() {
        let toml = Config::default().to_toml().unwrap();
        assert_eq!(toml.trim(), "history_capacity = 256");
    }
}
