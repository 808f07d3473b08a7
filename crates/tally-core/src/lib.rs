//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It turns a month of per-day
//! attendance codes into a net salary figure and guards the one-way
//! month-closing transition. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/console)                       │   │
//! │  │   Menu ──► Attendance ──► Close ──► View ──► Report ──► Backup  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tally-store (load → mutate → save)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌────────────────┐   │   │
//! │  │   │ calendar │ │ payroll  │ │ lifecycle │ │ employment     │   │   │
//! │  │   │ YearMonth│ │ Breakdown│ │ OPEN→     │ │ terminate      │   │   │
//! │  │   │ weekend  │ │ rates    │ │  CLOSED   │ │ reactivate     │   │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Employee, MonthlyRecord, AttendanceEntry, ...)
//! - [`money`] - Money type stored in integer cents
//! - [`calendar`] - `YearMonth`, day counts, weekend classification
//! - [`payroll`] - The payroll calculator
//! - [`lifecycle`] - Month lifecycle controller (begin, record day, close)
//! - [`employment`] - Termination, reactivation and employee edits
//! - [`report`] - Monthly report aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::calendar::YearMonth;
//! use tally_core::money::Money;
//! use tally_core::payroll::{calculate, Completeness, PayrollInput};
//! use tally_core::types::{AttendanceCode, AttendanceEntry};
//!
//! let month: YearMonth = "2025-06".parse().unwrap();
//! let entries: Vec<AttendanceEntry> = (1..=month.days())
//!     .map(|day| AttendanceEntry::new(day, AttendanceCode::Worked, 0))
//!     .collect();
//!
//! let input = PayrollInput {
//!     year_month: month,
//!     gross_salary: Money::from_cents(3_000_000),
//!     days_in_month: month.days(),
//!     effective_day_cap: month.days(),
//!     entries: &entries,
//!     completeness: Completeness::Required,
//! };
//!
//! let breakdown = calculate(&input).unwrap();
//! assert_eq!(breakdown.net_salary().cents(), 3_000_000);
//! ```

pub mod calendar;
pub mod employment;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod payroll;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calendar::YearMonth;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Nominal hours in a working day, used to derive the hourly rate.
pub const WORKDAY_HOURS: u32 = 9;

/// Unexcused absence is deducted at this many daily rates.
pub const ABSENCE_PENALTY_MULTIPLIER: u32 = 2;

/// Bounds for a single hourly-deduction entry.
pub const MIN_DEDUCTION_HOURS: u32 = 1;
pub const MAX_DEDUCTION_HOURS: u32 = 12;

/// Upper bound for a monthly gross salary (in cents).
///
/// Keeps every intermediate product comfortably inside `i64` cents.
pub const MAX_GROSS_SALARY_CENTS: i64 = 100_000_000_000;

/// Current on-disk ledger format.
pub const LEDGER_FORMAT_VERSION: u32 = 1;
