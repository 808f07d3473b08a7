//! # Validation Module
//!
//! Input parsing and validation for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  ├── Re-prompts until the text parses                                  │
//! │  └── Uses the parse_* functions below                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Core operations                                              │
//! │  ├── THIS MODULE again (register, rename, salary, hours)               │
//! │  └── Business rules (lifecycle, employment)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Record store                                                 │
//! │  └── serde rejects malformed months/codes on load                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{parse_money, validate_deduction_hours};
//!
//! assert_eq!(parse_money("30000").unwrap().cents(), 3_000_000);
//! assert_eq!(parse_money("1234,5").unwrap().cents(), 123_450);
//! assert!(validate_deduction_hours(13).is_err());
//! ```

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::YearMonth;
use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DEDUCTION_HOURS, MAX_GROSS_SALARY_CENTS, MIN_DEDUCTION_HOURS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum employee identifier length, in characters.
pub const MAX_EMPLOYEE_ID_LEN: usize = 64;

/// Maximum full name length, in characters.
pub const MAX_FULL_NAME_LEN: usize = 120;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an employee identifier.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
/// - No control characters
///
/// ## Returns
/// The trimmed identifier.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_employee_id;
///
/// assert_eq!(validate_employee_id(" E-01 ").unwrap(), "E-01");
/// assert!(validate_employee_id("").is_err());
/// ```
pub fn validate_employee_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "employee id".to_string(),
        });
    }

    if id.chars().count() > MAX_EMPLOYEE_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "employee id".to_string(),
            max: MAX_EMPLOYEE_ID_LEN,
        });
    }

    if id.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "employee id".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(id.to_string())
}

/// Validates a full name and returns it trimmed.
pub fn validate_full_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full name".to_string(),
        });
    }

    if name.chars().count() > MAX_FULL_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "full name".to_string(),
            max: MAX_FULL_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monthly gross salary.
///
/// ## Rules
/// - Zero is allowed
/// - Must not be negative or exceed `MAX_GROSS_SALARY_CENTS`
pub fn validate_gross_salary(salary: Money) -> ValidationResult<()> {
    if salary.is_negative() || salary.cents() > MAX_GROSS_SALARY_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "gross salary".to_string(),
            min: 0,
            max: MAX_GROSS_SALARY_CENTS / 100,
        });
    }

    Ok(())
}

/// Validates the hour count of an hourly deduction.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Day 14 (Sat) code: D                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  "How many hours are deducted on day 14?" 13                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_deduction_hours(13) ← THIS FUNCTION                          │
/// │       │                                                                 │
/// │       ├── outside 1..=12? → "hours must be between 1 and 12"           │
/// │       │                                                                 │
/// │       └── OK → entry stored with hours                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_deduction_hours(hours: u32) -> ValidationResult<u32> {
    if !(MIN_DEDUCTION_HOURS..=MAX_DEDUCTION_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "hours".to_string(),
            min: i64::from(MIN_DEDUCTION_HOURS),
            max: i64::from(MAX_DEDUCTION_HOURS),
        });
    }

    Ok(hours)
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a salary typed by the operator.
///
/// Accepts `.` or `,` as the decimal separator. More than two decimals are
/// rounded half-to-even.
pub fn parse_money(input: &str) -> ValidationResult<Money> {
    let normalized = input.trim().replace(',', ".");

    if normalized.is_empty() {
        return Err(ValidationError::Required {
            field: "amount".to_string(),
        });
    }

    let amount = Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: "must be a number such as 30000 or 30000.50".to_string(),
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: MAX_GROSS_SALARY_CENTS / 100,
        });
    }

    let money = Money::from_decimal(amount);
    validate_gross_salary(money)?;
    Ok(money)
}

/// Parses `YYYY-MM`.
pub fn parse_year_month(input: &str) -> ValidationResult<YearMonth> {
    input.parse()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected YYYY-MM-DD, e.g. 2025-08-15".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
