//! Configuration management for chapters.
//!
//! This module handles the optional `chapters.yaml` file in the working
//! directory. Every setting has a default, so a missing file is not an error.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "chapters.yaml";

/// Default database file name.
pub const DEFAULT_DATABASE: &str = "db_file.db";

/// Default operation log file name.
pub const DEFAULT_LOG_FILE: &str = "chapters-events.jsonl";

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Project configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Path of the chapter database. Relative paths are resolved against
    /// the directory holding the config file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Whether to append every operation to the event log.
    #[serde(default)]
    pub debug_logging: bool,

    /// Path of the JSONL event log, used when `debug_logging` is on.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self { database: default_database(), debug_logging: false, log_file: default_log_file() }
    }
}

impl ProjectConfig {
    /// Load config from the working directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(Path::new("."))
    }

    /// Load config from a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a base directory, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(base_dir)?.unwrap_or_default())
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(Self::config_path(base_dir), content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// Resolve the database path against a base directory.
    pub fn database_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.database)
    }

    /// Resolve the event log path against a base directory.
    pub fn log_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.log_file)
    }
}
