//! # tally-store: Record Store for Tally
//!
//! This crate persists the ledger as one JSON file and keeps timestamped
//! backups of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Console command (close a month)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RecordStore  │    │  Repositories │    │   Backups    │  │   │
//! │  │   │  (store.rs)   │    │ (employee.rs, │    │ (backup.rs)  │  │   │
//! │  │   │               │    │  month.rs)    │    │              │  │   │
//! │  │   │ load / save   │◄───│ load → rule   │    │ create/list  │  │   │
//! │  │   │ update        │    │   → save      │    │ restore      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ~/.local/share/tally/tally.json   +   backups/tally_backup_*   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store configuration, whole-file load and save
//! - [`backup`] - Backup creation, listing and restore
//! - [`error`] - Store error types
//! - [`repository`] - Employee and monthly record repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_store::{RecordStore, StoreConfig};
//!
//! let store = RecordStore::open(StoreConfig::new("tally.json"));
//!
//! store.employees().register("E-01", "Ada Byron", Money::from_cents(3_000_000))?;
//! store.months().begin_or_resume("E-01", "2025-06".parse()?)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::{BackupInfo, BackupManager};
pub use error::{StoreError, StoreResult};
pub use store::{RecordStore, StoreConfig};

// Repository re-exports for convenience
pub use repository::employee::EmployeeRepository;
pub use repository::month::MonthRepository;
