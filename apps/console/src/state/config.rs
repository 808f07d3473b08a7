//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Layering                               │
//! │                                                                         │
//! │  1. Defaults (this file)                                                │
//! │       │  data file in the platform data dir, pause after each action   │
//! │       ▼                                                                 │
//! │  2. Config file                                                         │
//! │       │  $TALLY_CONFIG, else <platform config dir>/tally.toml           │
//! │       │  (a missing file is not an error)                               │
//! │       ▼                                                                 │
//! │  3. Environment variables                                               │
//! │       │  TALLY_DATA_FILE, TALLY_BACKUP_DIR, TALLY_LOG                   │
//! │       ▼                                                                 │
//! │  4. validate()                                                          │
//! │                                                                         │
//! │  RUST_LOG, when set, still wins over [logging] filter.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [storage]
//! data_file = "/srv/payroll/tally.json"
//! backup_dir = "/srv/payroll/backups"
//!
//! [console]
//! clear_screen = true
//! pause_after_action = true
//!
//! [logging]
//! filter = "warn,tally=debug"
//! ```
//!
//! Configuration is read-only after startup, so no locking is needed.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tally_store::StoreConfig;
use thiserror::Error;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tally.toml";

/// Data file name inside the platform data directory.
pub const DATA_FILE_NAME: &str = "tally.json";

/// Filter used when neither RUST_LOG nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,tally=info";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// Where the ledger lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the JSON data file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Backup directory. Defaults to `backups/` next to the data file.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_file: default_data_file(),
            backup_dir: None,
        }
    }
}

/// Menu behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Clear the terminal before showing the menu.
    #[serde(default)]
    pub clear_screen: bool,

    /// Wait for ENTER after each action.
    #[serde(default = "default_true")]
    pub pause_after_action: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        ConsoleSettings {
            clear_screen: false,
            pause_after_action: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Platform data directory, or the working directory if there is none.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.tally.tally/tally.json`
/// - **Windows**: `%APPDATA%\tally\tally\data\tally.json`
/// - **Linux**: `~/.local/share/tally/tally.json`
fn default_data_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tally", "tally")
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads defaults, the config file and environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => AppConfig::load_from(&path)?,
            _ => AppConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, without any config file.
    ///
    /// Used when [`AppConfig::load`] fails.
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Reads a TOML config file. Missing sections and keys take defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `TALLY_*` overrides through `lookup`.
    ///
    /// ## Environment Variables
    /// - `TALLY_DATA_FILE`: data file path
    /// - `TALLY_BACKUP_DIR`: backup directory
    /// - `TALLY_LOG`: log filter
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TALLY_DATA_FILE") {
            self.storage.data_file = PathBuf::from(path);
        }

        if let Some(dir) = lookup("TALLY_BACKUP_DIR") {
            self.storage.backup_dir = Some(PathBuf::from(dir));
        }

        if let Some(filter) = lookup("TALLY_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Rejects empty paths and an empty log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage.data_file is empty".to_string()));
        }

        if let Some(dir) = &self.storage.backup_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("storage.backup_dir is empty".to_string()));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter is empty".to_string()));
        }

        Ok(())
    }

    /// Store settings derived from `[storage]`.
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(&self.storage.data_file);
        match &self.storage.backup_dir {
            Some(dir) => config.backup_dir(dir),
            None => config,
        }
    }
}

/// `$TALLY_CONFIG`, else `tally.toml` in the platform config directory.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TALLY_CONFIG") {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.storage.data_file.ends_with(DATA_FILE_NAME));
        assert_eq!(config.storage.backup_dir, None);
        assert!(!config.console.clear_screen);
        assert!(config.console.pause_after_action);
        assert_eq!(config.logging.filter, "warn,tally=info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.toml");
        fs::write(
            &path,
            "[storage]\ndata_file = \"/tmp/payroll.json\"\n\n[console]\nclear_screen = true\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.storage.data_file, PathBuf::from("/tmp/payroll.json"));
        assert!(config.console.clear_screen);
        assert!(config.console.pause_after_action);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_bad_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tally.toml");
        fs::write(&path, "[storage\ndata_file = 3").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AppConfig::load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TALLY_DATA_FILE", "/data/t.json"),
            ("TALLY_BACKUP_DIR", "/data/bk"),
            ("TALLY_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.data_file, PathBuf::from("/data/t.json"));
        assert_eq!(config.storage.backup_dir, Some(PathBuf::from("/data/bk")));
        assert_eq!(config.logging.filter, "debug");

        let store = config.store_config();
        assert_eq!(store.backup_dir, PathBuf::from("/data/bk"));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = AppConfig::default();
        config.storage.data_file = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.storage.backup_dir = Some(PathBuf::new());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
