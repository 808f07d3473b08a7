//! # Record Store
//!
//! Whole-file JSON persistence for the ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Record Store                                   │
//! │                                                                         │
//! │  Console startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← data file, backup dir                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RecordStore::open(config)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Every mutating operation:                                              │
//! │                                                                         │
//! │    load()  ──►  Ledger in memory  ──►  core rule  ──►  save()          │
//! │     │                                     │              │              │
//! │     │ missing file = empty ledger         │ Err: stop,   │ 1. backup   │
//! │     │ bad JSON     = Corrupt              │ no write     │ 2. temp file│
//! │     │                                                    │ 3. rename   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single process, single thread, no locking. Each operation sees the file
//! as the previous one left it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tally_core::{CoreResult, Ledger, LEDGER_FORMAT_VERSION};
use tracing::{debug, info};

use crate::backup::BackupManager;
use crate::error::{StoreError, StoreResult};
use crate::repository::employee::EmployeeRepository;
use crate::repository::month::MonthRepository;

/// Directory name used for backups when none is configured.
pub const DEFAULT_BACKUP_DIR_NAME: &str = "backups";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use tally_store::StoreConfig;
///
/// let config = StoreConfig::new("/var/lib/tally/ledger.json")
///     .backup_dir("/var/backups/tally");
/// assert!(config.backup_on_save);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The ledger JSON file.
    pub data_file: PathBuf,

    /// Where timestamped copies go.
    /// Default: `backups/` next to the data file
    pub backup_dir: PathBuf,

    /// Copy the current file aside before every save.
    /// Default: true
    pub backup_on_save: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given data file.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let backup_dir = data_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_BACKUP_DIR_NAME);
        StoreConfig {
            data_file,
            backup_dir,
            backup_on_save: true,
        }
    }

    /// Sets the backup directory.
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Sets whether saves take a backup first.
    pub fn backup_on_save(mut self, enabled: bool) -> Self {
        self.backup_on_save = enabled;
        self
    }
}

// =============================================================================
// Record Store
// =============================================================================

/// Handle to the ledger file, providing repository access.
#[derive(Debug, Clone)]
pub struct RecordStore {
    config: StoreConfig,
    backups: BackupManager,
}

impl RecordStore {
    /// Opens the store. Nothing is read until the first operation.
    pub fn open(config: StoreConfig) -> Self {
        info!(
            data_file = %config.data_file.display(),
            backup_dir = %config.backup_dir.display(),
            "Opening record store"
        );
        let backups = BackupManager::new(&config.data_file, &config.backup_dir);
        RecordStore { config, backups }
    }

    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Reads the whole ledger. A missing file is an empty ledger.
    pub fn load(&self) -> StoreResult<Ledger> {
        let path = &self.config.data_file;
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No data file yet, starting empty");
                return Ok(Ledger::default());
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let ledger = parse_ledger(path, &bytes)?;
        debug!(employees = ledger.employees.len(), "Ledger loaded");
        Ok(ledger)
    }

    /// Writes the whole ledger, backing up the previous file first.
    pub fn save(&self, ledger: &Ledger) -> StoreResult<()> {
        let path = &self.config.data_file;

        if self.config.backup_on_save {
            self.backups.create()?;
        }

        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|e| StoreError::corrupt(path, e.to_string()))?;
        write_replacing(path, &json)?;

        debug!(path = %path.display(), employees = ledger.employees.len(), "Ledger saved");
        Ok(())
    }

    /// Load → apply `op` → save. Nothing is written when `op` fails.
    pub fn update<T>(&self, op: impl FnOnce(&mut Ledger) -> CoreResult<T>) -> StoreResult<T> {
        let mut ledger = self.load()?;
        let value = op(&mut ledger)?;
        self.save(&ledger)?;
        Ok(value)
    }

    /// Returns the employee repository.
    pub fn employees(&self) -> EmployeeRepository<'_> {
        EmployeeRepository::new(self)
    }

    /// Returns the monthly record repository.
    pub fn months(&self) -> MonthRepository<'_> {
        MonthRepository::new(self)
    }

    /// Returns the backup manager.
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }
}

/// Parses ledger JSON, rejecting formats newer than this build.
///
/// Bytes that are not UTF-8 fail here as `Corrupt`, not as I/O errors.
pub(crate) fn parse_ledger(path: &Path, bytes: &[u8]) -> StoreResult<Ledger> {
    let ledger: Ledger =
        serde_json::from_slice(bytes).map_err(|e| StoreError::corrupt(path, e.to_string()))?;

    if ledger.version > LEDGER_FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: ledger.version,
            supported: LEDGER_FORMAT_VERSION,
        });
    }
    Ok(ledger)
}

/// Writes `bytes` to a sibling temp file, then renames it over `path`.
///
/// A crash mid-write leaves the previous file intact.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

// =============================================================================
// Unit Tests
// =============================================================================
