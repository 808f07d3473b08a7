//! # Repository Module
//!
//! Ledger repositories for Tally.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Console command                                                        │
//! │       │                                                                 │
//! │       │  store.months().record_day("E-01", june, 14, Worked, 0)         │
//! │       ▼                                                                 │
//! │  MonthRepository                                                        │
//! │  ├── load the whole ledger                                              │
//! │  ├── call tally_core::lifecycle::record_day                             │
//! │  └── save (only if the rule succeeded)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JSON data file (+ backup of the previous version)                      │
//! │                                                                         │
//! │  The rules live in tally-core; repositories only sequence               │
//! │  load → rule → save and log what happened.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EmployeeRepository`] - Registration, termination, edits
//! - [`MonthRepository`] - Attendance entry, closing, views, reports

pub mod employee;
pub mod month;

pub use employee::EmployeeRepository;
pub use month::MonthRepository;
