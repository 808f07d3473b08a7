//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Malformed input                                │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  └── StoreError       - Read/write/backup failures                     │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ConsoleError     - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ConsoleError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every business-rule violation aborts the operation before anything is
//! mutated, so callers can simply report the message and carry on.

use thiserror::Error;

use crate::calendar::YearMonth;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No employee with this identifier.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Registering an identifier that is already taken.
    #[error("Employee already exists: {0}")]
    EmployeeExists(String),

    /// No monthly record for this employee and month.
    #[error("No record for employee {employee_id} in {month}")]
    RecordNotFound { employee_id: String, month: YearMonth },

    /// Closing was attempted with days still missing.
    ///
    /// ## User Workflow
    /// ```text
    /// Close 2025-06 for E-01
    ///      │
    ///      ▼
    /// days 1..=30 checked, 14 and 15 have no code
    ///      │
    ///      ▼
    /// IncompleteMonth { missing: [14, 15] }
    ///      │
    ///      ▼
    /// Operator sees: "Missing days: 14, 15" and nothing is closed
    /// ```
    #[error("Month {month} is incomplete, missing days: {}", join_days(.missing))]
    IncompleteMonth { month: YearMonth, missing: Vec<u32> },

    /// Attendance for a month strictly after the termination month.
    #[error("Employee {employee_id} left on {termination_date}; no attendance can be entered for {month}")]
    AfterTermination {
        employee_id: String,
        termination_date: chrono::NaiveDate,
        month: YearMonth,
    },

    /// The record is CLOSED and the operation needs it OPEN.
    #[error("Month {month} is already closed for employee {employee_id}")]
    MonthClosed { employee_id: String, month: YearMonth },

    /// Day outside `1..=effective_day_cap`.
    #[error("Day {day} is outside 1..={cap}")]
    DayOutOfRange { day: u32, cap: u32 },

    /// A code already exists for that day.
    #[error("Day {0} already has an attendance entry")]
    DayAlreadyRecorded(u32),

    #[error("Employee {0} is already terminated")]
    AlreadyTerminated(String),

    #[error("Employee {0} is already active")]
    AlreadyActive(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn join_days(days: &[u32]) -> String {
    days.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements. They are always
/// recoverable by asking again.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid month, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_month_message_lists_days() {
        let err = CoreError::IncompleteMonth {
            month: YearMonth::new(2025, 6).unwrap(),
            missing: vec![14, 15, 30],
        };
        assert_eq!(
            err.to_string(),
            "Month 2025-06 is incomplete, missing days: 14, 15, 30"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "employee id".to_string(),
        };
        assert_eq!(err.to_string(), "employee id is required");

        let err = ValidationError::OutOfRange {
            field: "hours".to_string(),
            min: 1,
            max: 12,
        };
        assert_eq!(err.to_string(), "hours must be between 1 and 12");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
