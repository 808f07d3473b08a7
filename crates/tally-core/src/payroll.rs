//! # Payroll Calculator
//!
//! Turns a month of attendance codes into a [`PayrollBreakdown`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Payroll Calculation                              │
//! │                                                                         │
//! │  1. Completeness: every day 1..=cap needs a code (unless waived)        │
//! │                                                                         │
//! │  2. Rates (exact, never rounded):                                       │
//! │       daily  = gross / days_in_month                                    │
//! │       hourly = daily / 9                                                │
//! │                                                                         │
//! │  3. Classify each entry with day <= cap:                                │
//! │       WORKED            +daily                                          │
//! │       HALF_DAY          +daily / 2                                      │
//! │       HOLIDAY           +daily                                          │
//! │       LEAVE             -daily                                          │
//! │       ABSENT            -daily × 2                                      │
//! │       HOURLY_DEDUCTION  -hours × hourly                                 │
//! │                                                                         │
//! │  4. net = max(0, earned - deductions)                                   │
//! │                                                                         │
//! │  5. Every amount rounded to cents once, at the very end.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Days past the cap (a termination inside the month) simply do not count.
//! Nothing here mutates anything.

use rust_decimal::Decimal;

use crate::calendar::YearMonth;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AttendanceCode, AttendanceEntry, PayrollBreakdown};
use crate::{ABSENCE_PENALTY_MULTIPLIER, WORKDAY_HOURS};

// =============================================================================
// Inputs
// =============================================================================

/// Whether days without an entry block the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// Any missing day in `1..=cap` is an error.
    Required,
    /// Missing days contribute nothing.
    Waived,
}

/// Everything the calculator needs about one monthly record.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInput<'a> {
    pub year_month: YearMonth,
    pub gross_salary: Money,
    pub days_in_month: u32,
    /// Last payroll-relevant day. Equals `days_in_month` unless the
    /// employee left during this month.
    pub effective_day_cap: u32,
    pub entries: &'a [AttendanceEntry],
    pub completeness: Completeness,
}

/// Exact per-day and per-hour rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRates {
    pub daily: Decimal,
    pub hourly: Decimal,
}

/// Derives the exact rates, `None` for a zero-day month.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::payroll::daily_rates;
/// use rust_decimal::Decimal;
///
/// let rates = daily_rates(Money::from_cents(3_000_000), 30).unwrap();
/// assert_eq!(rates.daily, Decimal::from(1000));
/// assert_eq!(Money::from_decimal(rates.hourly).cents(), 11_111);
/// ```
pub fn daily_rates(gross_salary: Money, days_in_month: u32) -> Option<DailyRates> {
    if days_in_month == 0 {
        return None;
    }
    let daily = gross_salary.to_decimal() / Decimal::from(days_in_month);
    let hourly = daily / Decimal::from(WORKDAY_HOURS);
    Some(DailyRates { daily, hourly })
}

/// Days in `1..=cap` that have no entry, ascending.
pub fn missing_days(effective_day_cap: u32, entries: &[AttendanceEntry]) -> Vec<u32> {
    (1..=effective_day_cap)
        .filter(|day| !entries.iter().any(|e| e.day == *day))
        .collect()
}

// =============================================================================
// Calculation
// =============================================================================

/// Runs the payroll calculation.
///
/// ## Errors
/// - `IncompleteMonth` when completeness is required and days are missing
/// - `Validation` when `days_in_month` is zero
pub fn calculate(input: &PayrollInput<'_>) -> CoreResult<PayrollBreakdown> {
    let rates = daily_rates(input.gross_salary, input.days_in_month).ok_or_else(|| {
        ValidationError::OutOfRange {
            field: "days in month".to_string(),
            min: 28,
            max: 31,
        }
    })?;

    let cap = input.effective_day_cap.min(input.days_in_month);

    if input.completeness == Completeness::Required {
        let missing = missing_days(cap, input.entries);
        if !missing.is_empty() {
            return Err(CoreError::IncompleteMonth {
                month: input.year_month,
                missing,
            });
        }
    }

    let mut tally = Tally::default();
    for entry in input.entries.iter().filter(|e| (1..=cap).contains(&e.day)) {
        tally.add(entry, &rates);
    }

    let earned = tally.worked_pay + tally.half_day_pay + tally.holiday_pay;
    let deducted = tally.leave_deduction + tally.absence_deduction + tally.hourly_deduction;
    let net = (earned - deducted).max(Decimal::ZERO);

    Ok(PayrollBreakdown {
        worked_days: tally.worked_days,
        half_days: tally.half_days,
        leave_days: tally.leave_days,
        absent_days: tally.absent_days,
        holiday_days: tally.holiday_days,
        hourly_deduction_days: tally.hourly_deduction_days,
        deduction_hours: tally.deduction_hours,
        effective_day_cap: cap,
        daily_rate_cents: cents(rates.daily),
        hourly_rate_cents: cents(rates.hourly),
        worked_pay_cents: cents(tally.worked_pay),
        half_day_pay_cents: cents(tally.half_day_pay),
        holiday_pay_cents: cents(tally.holiday_pay),
        leave_deduction_cents: cents(tally.leave_deduction),
        absence_deduction_cents: cents(tally.absence_deduction),
        hourly_deduction_cents: cents(tally.hourly_deduction),
        total_gross_equivalent_cents: cents(earned),
        net_salary_cents: cents(net),
    })
}

#[inline]
fn cents(amount: Decimal) -> i64 {
    Money::from_decimal(amount).cents()
}

/// Running, unrounded totals.
#[derive(Default)]
struct Tally {
    worked_days: u32,
    half_days: u32,
    leave_days: u32,
    absent_days: u32,
    holiday_days: u32,
    hourly_deduction_days: u32,
    deduction_hours: u32,
    worked_pay: Decimal,
    half_day_pay: Decimal,
    holiday_pay: Decimal,
    leave_deduction: Decimal,
    absence_deduction: Decimal,
    hourly_deduction: Decimal,
}

impl Tally {
    fn add(&mut self, entry: &AttendanceEntry, rates: &DailyRates) {
        match entry.code {
            AttendanceCode::Worked => {
                self.worked_days += 1;
                self.worked_pay += rates.daily;
            }
            AttendanceCode::HalfDay => {
                self.half_days += 1;
                self.half_day_pay += rates.daily / Decimal::TWO;
            }
            AttendanceCode::Holiday => {
                self.holiday_days += 1;
                self.holiday_pay += rates.daily;
            }
            AttendanceCode::Leave => {
                self.leave_days += 1;
                self.leave_deduction += rates.daily;
            }
            AttendanceCode::Absent => {
                self.absent_days += 1;
                self.absence_deduction += rates.daily * Decimal::from(ABSENCE_PENALTY_MULTIPLIER);
            }
            AttendanceCode::HourlyDeduction => {
                self.hourly_deduction_days += 1;
                self.deduction_hours += entry.hours;
                self.hourly_deduction += rates.hourly * Decimal::from(entry.hours);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
