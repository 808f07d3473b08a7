//! # Backup Commands
//!
//! Menu option 7 and the startup recovery path.
//!
//! ## Startup Recovery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.load() ── Ok / no file ────────────────────► main menu           │
//! │       │                                                                 │
//! │       └── Unreadable / Corrupt / UnsupportedVersion                     │
//! │              │                                                          │
//! │              ▼                                                          │
//! │        list backups (newest first)                                      │
//! │              │                                                          │
//! │              ├── pick N ──► restore(N) ───────────► main menu           │
//! │              │             (damaged file is backed up first)            │
//! │              │             (broken backup: report, list again)          │
//! │              │                                                          │
//! │              └── pick 0 ──► save empty ledger ────► main menu           │
//! │                            (damaged file is backed up first)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use tally_core::Ledger;
use tally_store::{BackupInfo, RecordStore};
use tracing::{error, warn};

use crate::error::ConsoleResult;
use crate::prompt::Prompt;

/// Create, list or restore backups.
pub fn manage<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Backups ==")?;
    prompt.say(format_args!("Directory: {}", store.backups().backup_dir().display()))?;
    prompt.say("  1) Create a backup now")?;
    prompt.say("  2) List backups")?;
    prompt.say("  3) Restore a backup")?;
    prompt.say("  0) Back")?;

    match prompt.number("Option: ", 0, 3)? {
        1 => match store.backups().create()? {
            Some(info) => prompt.say(format_args!(
                "✓ Created {} ({} bytes)",
                info.file_name, info.size_bytes
            ))?,
            None => prompt.say("Nothing to back up yet: the data file does not exist.")?,
        },
        2 => {
            let backups = store.backups().list()?;
            if backups.is_empty() {
                prompt.say("No backups yet.")?;
            }
            list(prompt, &backups)?;
        }
        3 => {
            let backups = store.backups().list()?;
            if backups.is_empty() {
                prompt.say("No backups to restore.")?;
                return Ok(());
            }
            list(prompt, &backups)?;
            prompt.say("  0) Back")?;
            let choice = prompt.number("Backup: ", 0, backups.len() as u32)?;
            let Some(backup) = choice.checked_sub(1).map(|i| &backups[i as usize]) else {
                return Ok(());
            };

            let question = format!(
                "Replace the current data with {}? The current file is backed up first. [y/N]: ",
                backup.file_name
            );
            if !prompt.confirm(&question)? {
                prompt.say("Cancelled.")?;
                return Ok(());
            }
            let ledger = store.backups().restore(&backup.file_name)?;
            prompt.say(format_args!(
                "✓ Restored {} ({} employees)",
                backup.file_name,
                ledger.employees.len()
            ))?;
        }
        _ => {}
    }
    Ok(())
}

/// Loads the ledger once at startup and recovers when that fails.
///
/// Only a missing data file counts as a clean start; every other failure,
/// unreadable or unparsable, goes through [`recover`].
pub fn check_data_file<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    match store.load() {
        Ok(_) => Ok(()),
        Err(err) => recover(store, prompt, &err.to_string()),
    }
}

/// Offers a restore when the data file cannot be read, else starts empty.
///
/// A backup that fails to restore is reported and the list offered again.
pub fn recover<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
    reason: &str,
) -> ConsoleResult<()> {
    warn!(data_file = %store.data_file().display(), %reason, "Data file unreadable");
    prompt.say(format_args!("⚠ The data file could not be read: {}", reason))?;

    loop {
        let backups = store.backups().list().unwrap_or_else(|err| {
            warn!(error = %err, "Backups unavailable");
            Vec::new()
        });
        if backups.is_empty() {
            break;
        }

        prompt.say("Restore one of these backups?")?;
        list(prompt, &backups)?;
        prompt.say("  0) Start with an empty ledger")?;

        let choice = prompt.number("Backup: ", 0, backups.len() as u32)?;
        let Some(backup) = choice.checked_sub(1).map(|i| &backups[i as usize]) else {
            break;
        };

        match store.backups().restore(&backup.file_name) {
            Ok(ledger) => {
                prompt.say(format_args!(
                    "✓ Restored {} ({} employees)",
                    backup.file_name,
                    ledger.employees.len()
                ))?;
                return Ok(());
            }
            Err(err) => {
                warn!(backup = %backup.file_name, error = %err, "Restore failed");
                prompt.say(format_args!("✗ {}", err))?;
            }
        }
    }

    match store.save(&Ledger::default()) {
        Ok(()) => prompt
            .say("Starting with an empty ledger. The unreadable file was kept as a backup.")?,
        Err(err) => {
            error!(error = %err, "Could not replace the unreadable data file");
            prompt.say(format_args!("✗ Could not start an empty ledger: {}", err))?;
        }
    }
    Ok(())
}

fn list<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    backups: &[BackupInfo],
) -> ConsoleResult<()> {
    for (i, backup) in backups.iter().enumerate() {
        prompt.say(format_args!(
            "  {}) {}  {:>10} bytes",
            i + 1,
            backup.file_name,
            backup.size_bytes
        ))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;
    use std::fs;
    use tally_core::Money;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_list() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);

        let mut p = prompt("1\n");
        manage(&store, &mut p).unwrap();
        assert!(output(p).contains("✓ Created tally_backup_"));

        let mut p = prompt("2\n");
        manage(&store, &mut p).unwrap();
        let out = output(p);
        assert!(out.contains("  1) tally_backup_"));
        assert!(out.contains("bytes"));
    }

    #[test]
    fn test_create_without_data_file() {
        let dir = TempDir::new().unwrap();
        let mut p = prompt("1\n");
        manage(&store(&dir), &mut p).unwrap();
        assert!(output(p).contains("Nothing to back up yet"));
    }

    #[test]
    fn test_restore_after_confirmation() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        // second registration backs up the one-employee file
        store
            .employees()
            .register("E-02", "Alan Turing", Money::from_cents(100))
            .unwrap();
        assert_eq!(store.employees().list().unwrap().len(), 2);

        let mut p = prompt("3\n1\ny\n");
        manage(&store, &mut p).unwrap();
        assert!(output(p).contains("(1 employees)"));
        assert_eq!(store.employees().list().unwrap().len(), 1);
    }

    #[test]
    fn test_restore_cancelled() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .register("E-02", "Alan Turing", Money::from_cents(100))
            .unwrap();

        let mut p = prompt("3\n1\n\n");
        manage(&store, &mut p).unwrap();
        assert!(output(p).contains("Cancelled."));
        assert_eq!(store.employees().list().unwrap().len(), 2);
    }

    #[test]
    fn test_recover_from_backup() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .register("E-02", "Alan Turing", Money::from_cents(100))
            .unwrap();
        fs::write(store.data_file(), "{ not json").unwrap();
        let reason = store.load().unwrap_err().to_string();

        let mut p = prompt("1\n");
        recover(&store, &mut p, &reason).unwrap();

        assert!(output(p).contains("could not be read"));
        assert_eq!(store.employees().list().unwrap().len(), 1);
    }

    #[test]
    fn test_recover_skips_broken_backup() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        for (id, name) in [("E-02", "Alan Turing"), ("E-03", "Grace Hopper")] {
            store.employees().register(id, name, Money::from_cents(100)).unwrap();
        }
        // newest backup holds two employees, the older one holds one
        let backups = store.backups().list().unwrap();
        assert_eq!(backups.len(), 2);
        fs::write(&backups[0].path, "{ broken").unwrap();
        fs::write(store.data_file(), "{ not json").unwrap();

        let mut p = prompt("1\n2\n");
        recover(&store, &mut p, "expected value").unwrap();

        let out = output(p);
        assert!(out.contains("is corrupt"));
        assert!(out.contains("(1 employees)"));
        assert_eq!(store.employees().list().unwrap().len(), 1);
    }

    #[test]
    fn test_check_data_file_recovers_binary_garbage() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .register("E-02", "Alan Turing", Money::from_cents(100))
            .unwrap();
        fs::write(store.data_file(), [0xff, 0xfe, 0x7b]).unwrap();

        let mut p = prompt("1\n");
        check_data_file(&store, &mut p).unwrap();

        assert!(output(p).contains("could not be read"));
        assert_eq!(store.employees().list().unwrap().len(), 1);
    }

    #[test]
    fn test_check_data_file_passes_readable_ledger() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        let mut p = prompt("");
        check_data_file(&store, &mut p).unwrap();
        assert!(output(p).is_empty());
    }

    #[test]
    fn test_recover_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.data_file(), "garbage").unwrap();

        let mut p = prompt("");
        recover(&store, &mut p, "expected value").unwrap();

        assert!(output(p).contains("Starting with an empty ledger."));
        assert!(store.load().unwrap().is_empty());
        // the damaged file survives as a backup
        let backups = store.backups().list().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0].path).unwrap(), "garbage");
    }
}
