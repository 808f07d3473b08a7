//! # Attendance Calendar
//!
//! Year-month arithmetic for the ledger: how many days a month has, and
//! which of them fall on a weekend.
//!
//! ## The YearMonth Key
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "2025-06"  ──parse──►  YearMonth { year: 2025, month: 6 }              │
//! │                              │                                          │
//! │                              ├── days()        → 30                     │
//! │                              ├── date(14)      → 2025-06-14             │
//! │                              ├── contains(d)   → same year and month?   │
//! │                              └── Display       → "2025-06"              │
//! │                                                                         │
//! │  Ordering is chronological, so `a > b` means "a is a later month".      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weekend classification is informational only. It annotates the day
//! prompt and never changes what a day is worth.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fallback used by [`days_in_month`] when the input does not parse.
pub const FALLBACK_DAYS_IN_MONTH: u32 = 30;

// =============================================================================
// YearMonth
// =============================================================================

/// A calendar month, serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, rejecting months outside 1..=12 and years
    /// outside 1..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=9999).contains(&year) {
            return Err(ValidationError::OutOfRange {
                field: "year".to_string(),
                min: 1,
                max: 9999,
            });
        }
        if !(1..=12).contains(&month) {
            return Err(ValidationError::OutOfRange {
                field: "month".to_string(),
                min: 1,
                max: 12,
            });
        }
        Ok(YearMonth { year, month })
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Number of calendar days in this month (28-31).
    pub const fn days(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The date of `day` in this month, if such a day exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Accepts `YYYY-MM` (a single-digit month such as `2025-6` is tolerated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "month".to_string(),
            reason: "expected YYYY-MM, e.g. 2025-08".to_string(),
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Day count for a `YYYY-MM` string, or 30 when it does not parse.
///
/// ## Example
/// ```rust
/// use tally_core::calendar::days_in_month;
///
/// assert_eq!(days_in_month("2024-02"), 29);
/// assert_eq!(days_in_month("garbage"), 30);
/// ```
pub fn days_in_month(year_month: &str) -> u32 {
    year_month
        .parse::<YearMonth>()
        .map(|ym| ym.days())
        .unwrap_or(FALLBACK_DAYS_IN_MONTH)
}

/// True for Saturday and Sunday. Days that do not exist are not weekends.
pub fn is_weekend(month: YearMonth, day: u32) -> bool {
    month
        .date(day)
        .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .unwrap_or(false)
}

/// Short weekday name ("Mon".."Sun") for prompt annotation.
pub fn weekday_label(month: YearMonth, day: u32) -> Option<&'static str> {
    let label = match month.date(day)?.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    Some(label)
}

// =============================================================================
// Unit Tests
// =============================================================================
