//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Ledger (whole store)                                                   │
//! │  └── employees: employee_id ──► EmployeeLedger                          │
//! │                                 ├── employee: Employee (profile)        │
//! │                                 │     is_active, termination_date       │
//! │                                 └── months: [MonthlyRecord]             │
//! │                                       ├── year_month, status            │
//! │                                       ├── entries: [AttendanceEntry]    │
//! │                                       └── calculation: PayrollBreakdown │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ AttendanceCode  │   │  MonthStatus    │   │ PayrollBreakdown│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  WORKED  W      │   │  OPEN           │   │  day counts     │       │
//! │  │  LEAVE   L      │   │  CLOSED         │   │  *_cents        │       │
//! │  │  ABSENT  A  ... │   │  (one way)      │   │  net_salary     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A monthly record freezes the employee's name and salary at the time the
//! month was opened. Employment state is NOT frozen: it lives on the
//! profile only, so terminating an employee is visible from every record.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::LEDGER_FORMAT_VERSION;

// =============================================================================
// Employee
// =============================================================================

/// The employee profile. One per employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Operator-chosen identifier, unique across the ledger.
    pub id: String,

    pub full_name: String,

    /// Current monthly gross salary in cents. Seeds newly opened months.
    pub gross_salary_cents: i64,

    pub is_active: bool,

    /// Last employed day, if terminated.
    pub termination_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Returns the gross salary as Money.
    #[inline]
    pub fn gross_salary(&self) -> Money {
        Money::from_cents(self.gross_salary_cents)
    }

    /// The month containing the termination date, if any.
    pub fn termination_month(&self) -> Option<YearMonth> {
        self.termination_date.map(YearMonth::of)
    }

    /// True when `month` is strictly after the termination month.
    pub fn is_locked_out_of(&self, month: YearMonth) -> bool {
        self.termination_month().is_some_and(|t| month > t)
    }

    /// The termination date when it falls inside `month`.
    pub fn terminated_within(&self, month: YearMonth) -> Option<NaiveDate> {
        self.termination_date.filter(|d| month.contains(*d))
    }
}

// =============================================================================
// Attendance Code
// =============================================================================

/// The classification of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceCode {
    /// Full paid day.
    Worked,
    /// Excused leave, deducted at one daily rate.
    Leave,
    /// Unexcused absence, deducted at two daily rates.
    Absent,
    /// Half a daily rate is paid.
    HalfDay,
    /// A number of hours is deducted at the hourly rate.
    HourlyDeduction,
    /// Public holiday, paid as a full day.
    Holiday,
}

impl AttendanceCode {
    pub const ALL: [AttendanceCode; 6] = [
        AttendanceCode::Worked,
        AttendanceCode::Leave,
        AttendanceCode::Absent,
        AttendanceCode::HalfDay,
        AttendanceCode::HourlyDeduction,
        AttendanceCode::Holiday,
    ];

    /// Single-letter key typed at the day prompt.
    pub const fn key(&self) -> char {
        match self {
            AttendanceCode::Worked => 'W',
            AttendanceCode::Leave => 'L',
            AttendanceCode::Absent => 'A',
            AttendanceCode::HalfDay => 'H',
            AttendanceCode::HourlyDeduction => 'D',
            AttendanceCode::Holiday => 'P',
        }
    }

    /// Parses a prompt key, case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        Self::ALL.into_iter().find(|code| code.key() == key)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AttendanceCode::Worked => "Worked",
            AttendanceCode::Leave => "Leave",
            AttendanceCode::Absent => "Absent",
            AttendanceCode::HalfDay => "Half day",
            AttendanceCode::HourlyDeduction => "Hourly deduction",
            AttendanceCode::Holiday => "Public holiday",
        }
    }

    /// Whether the code carries an hour count.
    #[inline]
    pub const fn takes_hours(&self) -> bool {
        matches!(self, AttendanceCode::HourlyDeduction)
    }
}

// =============================================================================
// Attendance Entry
// =============================================================================

/// One day's code. `hours` is meaningful only for hourly deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub day: u32,
    pub code: AttendanceCode,
    pub hours: u32,
}

impl AttendanceEntry {
    pub const fn new(day: u32, code: AttendanceCode, hours: u32) -> Self {
        AttendanceEntry { day, code, hours }
    }
}

// =============================================================================
// Month Status
// =============================================================================

/// Monthly record state. OPEN → CLOSED, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthStatus {
    /// Accepting attendance entries.
    Open,
    /// Payroll calculated and frozen.
    Closed,
}

impl Default for MonthStatus {
    fn default() -> Self {
        MonthStatus::Open
    }
}

impl std::fmt::Display for MonthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthStatus::Open => f.write_str("OPEN"),
            MonthStatus::Closed => f.write_str("CLOSED"),
        }
    }
}

// =============================================================================
// Payroll Breakdown
// =============================================================================

/// Result of the payroll calculation, stored on the record at closing.
///
/// Each amount is rounded to cents independently. `net_salary_cents` is
/// rounded from the exact difference, so it can differ by a cent from
/// subtracting the rounded parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    pub worked_days: u32,
    pub half_days: u32,
    pub leave_days: u32,
    pub absent_days: u32,
    pub holiday_days: u32,
    pub hourly_deduction_days: u32,
    /// Sum of hours over all hourly-deduction entries.
    pub deduction_hours: u32,
    /// Last day that counted towards this calculation.
    pub effective_day_cap: u32,

    pub daily_rate_cents: i64,
    pub hourly_rate_cents: i64,

    pub worked_pay_cents: i64,
    pub half_day_pay_cents: i64,
    pub holiday_pay_cents: i64,
    pub leave_deduction_cents: i64,
    pub absence_deduction_cents: i64,
    pub hourly_deduction_cents: i64,

    /// Worked + half-day + holiday pay.
    pub total_gross_equivalent_cents: i64,
    /// Never negative.
    pub net_salary_cents: i64,
}

impl PayrollBreakdown {
    #[inline]
    pub fn daily_rate(&self) -> Money {
        Money::from_cents(self.daily_rate_cents)
    }

    #[inline]
    pub fn hourly_rate(&self) -> Money {
        Money::from_cents(self.hourly_rate_cents)
    }

    #[inline]
    pub fn total_gross_equivalent(&self) -> Money {
        Money::from_cents(self.total_gross_equivalent_cents)
    }

    #[inline]
    pub fn net_salary(&self) -> Money {
        Money::from_cents(self.net_salary_cents)
    }

    /// Leave + absence + hourly deductions.
    pub fn total_deductions(&self) -> Money {
        Money::from_cents(
            self.leave_deduction_cents + self.absence_deduction_cents + self.hourly_deduction_cents,
        )
    }
}

// =============================================================================
// Monthly Record
// =============================================================================

/// One employee's attendance and payroll data for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub employee_id: String,
    /// Name at the time the month was opened (updated by renames).
    pub full_name: String,
    pub year_month: YearMonth,
    /// Gross salary in cents. Frozen once the record is closed.
    pub gross_salary_cents: i64,
    pub days_in_month: u32,
    /// Sorted by day, at most one entry per day.
    #[serde(default)]
    pub entries: Vec<AttendanceEntry>,
    /// Present once closed.
    #[serde(default)]
    pub calculation: Option<PayrollBreakdown>,
    #[serde(default)]
    pub status: MonthStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl MonthlyRecord {
    /// A fresh OPEN record seeded from the profile.
    pub fn open(employee: &Employee, year_month: YearMonth, now: DateTime<Utc>) -> Self {
        MonthlyRecord {
            employee_id: employee.id.clone(),
            full_name: employee.full_name.clone(),
            year_month,
            gross_salary_cents: employee.gross_salary_cents,
            days_in_month: year_month.days(),
            entries: Vec::new(),
            calculation: None,
            status: MonthStatus::Open,
            created_at: now,
            closed_at: None,
        }
    }

    #[inline]
    pub fn gross_salary(&self) -> Money {
        Money::from_cents(self.gross_salary_cents)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status == MonthStatus::Closed
    }

    /// The entry recorded for `day`, if any.
    pub fn entry(&self, day: u32) -> Option<&AttendanceEntry> {
        self.entries
            .binary_search_by_key(&day, |e| e.day)
            .ok()
            .map(|idx| &self.entries[idx])
    }
}

// =============================================================================
// Employee Ledger
// =============================================================================

/// A profile together with its monthly records, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLedger {
    pub employee: Employee,
    #[serde(default)]
    pub months: Vec<MonthlyRecord>,
}

impl EmployeeLedger {
    pub fn new(employee: Employee) -> Self {
        EmployeeLedger {
            employee,
            months: Vec::new(),
        }
    }

    pub fn month(&self, year_month: YearMonth) -> Option<&MonthlyRecord> {
        self.months.iter().find(|m| m.year_month == year_month)
    }

    pub fn month_mut(&mut self, year_month: YearMonth) -> Option<&mut MonthlyRecord> {
        self.months.iter_mut().find(|m| m.year_month == year_month)
    }

    /// Like [`Self::month`], but a missing record is an error.
    pub fn require_month(&self, year_month: YearMonth) -> CoreResult<&MonthlyRecord> {
        self.month(year_month).ok_or_else(|| CoreError::RecordNotFound {
            employee_id: self.employee.id.clone(),
            month: year_month,
        })
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The entire persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub version: u32,
    /// Keyed by employee identifier, so iteration is ordered by id.
    #[serde(default)]
    pub employees: BTreeMap<String, EmployeeLedger>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            version: LEDGER_FORMAT_VERSION,
            employees: BTreeMap::new(),
        }
    }
}

impl Ledger {
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn contains(&self, employee_id: &str) -> bool {
        self.employees.contains_key(employee_id)
    }

    /// Looks up an employee, failing with `EmployeeNotFound`.
    pub fn employee(&self, employee_id: &str) -> CoreResult<&EmployeeLedger> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| CoreError::EmployeeNotFound(employee_id.to_string()))
    }

    /// Mutable variant of [`Self::employee`].
    pub fn employee_mut(&mut self, employee_id: &str) -> CoreResult<&mut EmployeeLedger> {
        self.employees
            .get_mut(employee_id)
            .ok_or_else(|| CoreError::EmployeeNotFound(employee_id.to_string()))
    }

    /// Every record for `year_month`, paired with its owning profile.
    pub fn records_for(&self, year_month: YearMonth) -> Vec<(&Employee, &MonthlyRecord)> {
        self.employees
            .values()
            .filter_map(|acc| acc.month(year_month).map(|rec| (&acc.employee, rec)))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
