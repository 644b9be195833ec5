//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database path, slot key and logging settings for `app::launch`.
//!
//! # Invariants
//! - Resolution never fails: blank or invalid values fall back to defaults.

use crate::logging::{default_log_level, init_logging, normalize_level};
use crate::service::note_storage::DEFAULT_STORAGE_KEY;
use log::warn;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "BLOCKNOTE_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "BLOCKNOTE_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "BLOCKNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BLOCKNOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "blocknote.sqlite3";

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding the storage slot.
    pub db_path: PathBuf,
    /// Slot key of the note collection.
    pub storage_key: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: &'static str,
    /// Log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw).unwrap_or_else(|_| {
                warn!("event=config_resolve module=config status=degraded field={ENV_LOG_LEVEL}");
                defaults.log_level
            }),
            None => defaults.log_level,
        };

        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            storage_key: read(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            log_level,
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// # Errors
    /// Propagates `init_logging` errors (relative path, reconfiguration, ...).
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(dir) = self.log_dir.as_ref() else {
            return Ok(());
        };
        let dir = dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", dir.display()))?;
        init_logging(self.log_level, dir)
    }
}
