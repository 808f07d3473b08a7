//! # Backups
//!
//! Timestamped copies of the data file.
//!
//! ```text
//!   backups/
//!   ├── tally_backup_20250630_174512_031.json   ← newest first in list()
//!   ├── tally_backup_20250630_174455_902.json
//!   └── tally_backup_20250629_090001_000.json
//! ```
//!
//! Backups are taken before every save and on demand. They are never
//! pruned. A restore parses the chosen copy first, snapshots the live file,
//! and only then swaps it in through a temp file and rename.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tally_core::Ledger;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{parse_ledger, write_replacing};

/// File name prefix shared by every backup.
pub const BACKUP_PREFIX: &str = "tally_backup_";

const BACKUP_EXTENSION: &str = ".json";

/// A backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Creates, lists and restores backups of one data file.
#[derive(Debug, Clone)]
pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(data_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        BackupManager {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the data file into the backup directory.
    ///
    /// Returns `None` when there is no data file to copy.
    pub fn create(&self) -> StoreResult<Option<BackupInfo>> {
        if !self.data_file.exists() {
            debug!("No data file, skipping backup");
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| StoreError::io(&self.backup_dir, e))?;

        let path = self.next_backup_path();
        let size_bytes =
            fs::copy(&self.data_file, &path).map_err(|e| StoreError::io(&path, e))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(backup = %file_name, size_bytes, "Backup created");

        Ok(Some(BackupInfo {
            file_name,
            path,
            size_bytes,
        }))
    }

    /// All backups, newest first.
    pub fn list(&self) -> StoreResult<Vec<BackupInfo>> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.backup_dir, e)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.backup_dir, e))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !is_backup_name(&file_name) {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| StoreError::io(entry.path(), e))?;
            if !metadata.is_file() {
                continue;
            }
            backups.push(BackupInfo {
                file_name,
                path: entry.path(),
                size_bytes: metadata.len(),
            });
        }

        backups.sort_by(|a, b| b.file_name.cmp(&a.file_name));
        Ok(backups)
    }

    /// Replaces the data file with the named backup.
    ///
    /// The backup must parse as a ledger. The current data file is itself
    /// backed up before being overwritten.
    pub fn restore(&self, file_name: &str) -> StoreResult<Ledger> {
        if !is_backup_name(file_name) || file_name.contains('/') || file_name.contains('\\') {
            return Err(StoreError::BackupNotFound(file_name.to_string()));
        }

        let source = self.backup_dir.join(file_name);
        let bytes = match fs::read(&source) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::BackupNotFound(file_name.to_string()))
            }
            Err(e) => return Err(StoreError::io(&source, e)),
        };
        let ledger = parse_ledger(&source, &bytes)?;

        self.create()?;
        write_replacing(&self.data_file, &bytes)?;

        info!(backup = %file_name, employees = ledger.employees.len(), "Backup restored");
        Ok(ledger)
    }

    /// `tally_backup_YYYYMMDD_HHMMSS_mmm.json`, suffixed if already taken.
    fn next_backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
        let base = format!("{BACKUP_PREFIX}{stamp}");

        let mut path = self.backup_dir.join(format!("{base}{BACKUP_EXTENSION}"));
        let mut n = 1;
        while path.exists() {
            path = self.backup_dir.join(format!("{base}_{n}{BACKUP_EXTENSION}"));
            n += 1;
        }
        path
    }
}

fn is_backup_name(name: &str) -> bool {
    name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tally_core::lifecycle::register_employee;
    use tally_core::Money;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> BackupManager {
        BackupManager::new(dir.path().join("tally.json"), dir.path().join("backups"))
    }

    fn write_ledger(path: &Path, ids: &[&str]) {
        let mut ledger = Ledger::default();
        for id in ids {
            register_employee(&mut ledger, id, "Someone", Money::zero(), Utc::now()).unwrap();
        }
        fs::write(path, serde_json::to_string_pretty(&ledger).unwrap()).unwrap();
    }

    #[test]
    fn test_create_without_data_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(manager(&dir).create().unwrap(), None);
        assert!(manager(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn test_create_names_and_sizes() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        write_ledger(&dir.path().join("tally.json"), &["E-01"]);

        let info = mgr.create().unwrap().unwrap();
        assert!(info.file_name.starts_with(BACKUP_PREFIX));
        assert!(info.file_name.ends_with(".json"));
        // tally_backup_ + YYYYMMDD_HHMMSS_mmm + .json
        assert_eq!(info.file_name.len(), BACKUP_PREFIX.len() + 19 + 5);
        assert_eq!(
            info.size_bytes,
            fs::metadata(dir.path().join("tally.json")).unwrap().len()
        );
    }

    #[test]
    fn test_list_is_newest_first_and_ignores_strangers() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        write_ledger(&dir.path().join("tally.json"), &["E-01"]);

        let first = mgr.create().unwrap().unwrap();
        let second = mgr.create().unwrap().unwrap();
        fs::write(dir.path().join("backups").join("notes.txt"), "hi").unwrap();

        let list = mgr.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].file_name, second.file_name);
        assert_eq!(list[1].file_name, first.file_name);
    }

    #[test]
    fn test_restore_replaces_data_file() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let data = dir.path().join("tally.json");

        write_ledger(&data, &["E-01"]);
        let snapshot = mgr.create().unwrap().unwrap();
        write_ledger(&data, &["E-01", "E-02"]);

        let restored = mgr.restore(&snapshot.file_name).unwrap();
        assert_eq!(restored.employees.len(), 1);

        let on_disk: Ledger = serde_json::from_str(&fs::read_to_string(&data).unwrap()).unwrap();
        assert_eq!(on_disk, restored);
        // the two-employee file was kept as a backup
        assert_eq!(mgr.list().unwrap().len(), 2);
        assert!(!dir.path().join("tally.json.tmp").exists());
    }

    #[test]
    fn test_restore_rejects_corrupt_and_unknown() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let data = dir.path().join("tally.json");
        write_ledger(&data, &["E-01"]);
        let before = fs::read_to_string(&data).unwrap();

        fs::create_dir_all(dir.path().join("backups")).unwrap();
        let bad = format!("{BACKUP_PREFIX}20200101_000000_000.json");
        fs::write(dir.path().join("backups").join(&bad), "garbage").unwrap();

        assert!(matches!(mgr.restore(&bad), Err(StoreError::Corrupt { .. })));
        assert!(matches!(
            mgr.restore("tally_backup_missing.json"),
            Err(StoreError::BackupNotFound(_))
        ));
        assert!(matches!(
            mgr.restore("../tally.json"),
            Err(StoreError::BackupNotFound(_))
        ));
        assert_eq!(fs::read_to_string(&data).unwrap(), before);
    }
}
