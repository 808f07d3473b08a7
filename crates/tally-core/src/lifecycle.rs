//! # Month Lifecycle Controller
//!
//! Enforces the one-way OPEN → CLOSED transition of a monthly record.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   (none) ──begin_or_resume──► OPEN ──close_month──► CLOSED              │
//! │                                 │  ▲                    │               │
//! │                    record_day   │  │                    │ close_month   │
//! │                                 └──┘                    ▼ (recompute,   │
//! │                                                         CLOSED  no-op)  │
//! │                                                                         │
//! │   Refusals:                                                             │
//! │   • begin_or_resume on a CLOSED month          → MonthClosed            │
//! │   • any month after the termination month      → AfterTermination       │
//! │   • record_day outside 1..=cap / twice         → DayOutOfRange /        │
//! │                                                  DayAlreadyRecorded     │
//! │   • close_month with required days missing     → IncompleteMonth        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function validates fully before touching the record, so an `Err`
//! always means nothing changed.

use chrono::{DateTime, Utc};

use crate::calendar::YearMonth;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::payroll::{self, Completeness, PayrollInput};
use crate::types::{
    AttendanceCode, AttendanceEntry, Employee, EmployeeLedger, Ledger, MonthStatus,
    MonthlyRecord, PayrollBreakdown,
};
use crate::validation::{
    validate_deduction_hours, validate_employee_id, validate_full_name, validate_gross_salary,
};

// =============================================================================
// Outcomes
// =============================================================================

/// What [`begin_or_resume`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A new OPEN record was added.
    Created,
    /// An existing OPEN record was picked up again.
    Resumed,
}

/// What [`close_month`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The record transitioned to CLOSED with this breakdown.
    Closed(PayrollBreakdown),
    /// The record was already CLOSED; the breakdown is a recomputation.
    AlreadyClosed(PayrollBreakdown),
}

impl CloseOutcome {
    pub fn breakdown(&self) -> &PayrollBreakdown {
        match self {
            CloseOutcome::Closed(b) | CloseOutcome::AlreadyClosed(b) => b,
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Adds a new employee profile with no monthly records.
///
/// Identifier and name are trimmed before being stored.
pub fn register_employee<'a>(
    ledger: &'a mut Ledger,
    employee_id: &str,
    full_name: &str,
    gross_salary: Money,
    now: DateTime<Utc>,
) -> CoreResult<&'a mut EmployeeLedger> {
    let id = validate_employee_id(employee_id)?;
    let full_name = validate_full_name(full_name)?;
    validate_gross_salary(gross_salary)?;

    if ledger.contains(&id) {
        return Err(CoreError::EmployeeExists(id));
    }

    let employee = Employee {
        id: id.clone(),
        full_name,
        gross_salary_cents: gross_salary.cents(),
        is_active: true,
        termination_date: None,
        created_at: now,
    };
    Ok(ledger
        .employees
        .entry(id)
        .or_insert_with(|| EmployeeLedger::new(employee)))
}

// =============================================================================
// Day Cap & Completeness
// =============================================================================

/// Last payroll-relevant day of `month` for this employee.
///
/// The termination day when the employee left during `month`, otherwise the
/// month's length.
pub fn effective_day_cap(employee: &Employee, month: YearMonth) -> u32 {
    match employee.terminated_within(month) {
        Some(date) => chrono::Datelike::day(&date),
        None => month.days(),
    }
}

/// Whether missing days block closing `month`.
///
/// Blocking applies while the employee is still employed, and for the month
/// in which they left. Months of a terminated employee that lie outside the
/// termination month close with whatever was entered.
pub fn completeness_for(employee: &Employee, month: YearMonth) -> Completeness {
    match employee.termination_date {
        None => Completeness::Required,
        Some(date) if month.contains(date) => Completeness::Required,
        Some(_) => Completeness::Waived,
    }
}

/// Days in `1..=cap` with no entry yet.
pub fn missing_days(employee: &Employee, record: &MonthlyRecord) -> Vec<u32> {
    let cap = effective_day_cap(employee, record.year_month);
    payroll::missing_days(cap, &record.entries)
}

fn ensure_not_after_termination(employee: &Employee, month: YearMonth) -> CoreResult<()> {
    match employee.termination_date {
        Some(date) if employee.is_locked_out_of(month) => Err(CoreError::AfterTermination {
            employee_id: employee.id.clone(),
            termination_date: date,
            month,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Opens `month` for attendance entry, or resumes an existing OPEN record.
///
/// ## Errors
/// - `AfterTermination` if `month` is after the termination month
/// - `MonthClosed` if a CLOSED record exists for `month`
pub fn begin_or_resume(
    account: &mut EmployeeLedger,
    month: YearMonth,
    now: DateTime<Utc>,
) -> CoreResult<BeginOutcome> {
    ensure_not_after_termination(&account.employee, month)?;

    if let Some(existing) = account.month(month) {
        if existing.is_closed() {
            return Err(CoreError::MonthClosed {
                employee_id: account.employee.id.clone(),
                month,
            });
        }
        return Ok(BeginOutcome::Resumed);
    }

    account
        .months
        .push(MonthlyRecord::open(&account.employee, month, now));
    Ok(BeginOutcome::Created)
}

/// Records one day's code on an OPEN record.
///
/// `hours` is validated (1..=12) for hourly deductions and stored as 0 for
/// every other code.
pub fn record_day(
    account: &mut EmployeeLedger,
    month: YearMonth,
    day: u32,
    code: AttendanceCode,
    hours: u32,
) -> CoreResult<()> {
    let EmployeeLedger { employee, months } = account;
    let record = months
        .iter_mut()
        .find(|m| m.year_month == month)
        .ok_or_else(|| CoreError::RecordNotFound {
            employee_id: employee.id.clone(),
            month,
        })?;

    if record.is_closed() {
        return Err(CoreError::MonthClosed {
            employee_id: employee.id.clone(),
            month,
        });
    }
    ensure_not_after_termination(employee, month)?;

    let cap = effective_day_cap(employee, month);
    if !(1..=cap).contains(&day) {
        return Err(CoreError::DayOutOfRange { day, cap });
    }

    let slot = match record.entries.binary_search_by_key(&day, |e| e.day) {
        Ok(_) => return Err(CoreError::DayAlreadyRecorded(day)),
        Err(slot) => slot,
    };

    let hours = if code.takes_hours() {
        validate_deduction_hours(hours)?
    } else {
        0
    };

    record
        .entries
        .insert(slot, AttendanceEntry::new(day, code, hours));
    Ok(())
}

/// Computes the breakdown for a record without changing it.
pub fn preview(employee: &Employee, record: &MonthlyRecord) -> CoreResult<PayrollBreakdown> {
    let completeness = if record.is_closed() {
        Completeness::Waived
    } else {
        completeness_for(employee, record.year_month)
    };
    payroll::calculate(&PayrollInput {
        year_month: record.year_month,
        gross_salary: record.gross_salary(),
        days_in_month: record.days_in_month,
        effective_day_cap: effective_day_cap(employee, record.year_month),
        entries: &record.entries,
        completeness,
    })
}

/// Runs payroll and closes the month.
///
/// An already-closed record is recomputed and left untouched. On
/// `IncompleteMonth` the record is also left untouched.
pub fn close_month(
    account: &mut EmployeeLedger,
    month: YearMonth,
    now: DateTime<Utc>,
) -> CoreResult<CloseOutcome> {
    let EmployeeLedger { employee, months } = account;
    let record = months
        .iter_mut()
        .find(|m| m.year_month == month)
        .ok_or_else(|| CoreError::RecordNotFound {
            employee_id: employee.id.clone(),
            month,
        })?;

    let breakdown = preview(employee, record)?;

    if record.is_closed() {
        return Ok(CloseOutcome::AlreadyClosed(breakdown));
    }

    record.calculation = Some(breakdown.clone());
    record.status = MonthStatus::Closed;
    record.closed_at = Some(now);
    Ok(CloseOutcome::Closed(breakdown))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june() -> YearMonth {
        "2025-06".parse().unwrap()
    }

    fn setup() -> Ledger {
        let mut ledger = Ledger::default();
        register_employee(
            &mut ledger,
            " E-01 ",
            "Ada Byron",
            Money::from_cents(3_000_000),
            Utc::now(),
        )
        .unwrap();
        ledger
    }

    fn fill(account: &mut EmployeeLedger, month: YearMonth, days: std::ops::RangeInclusive<u32>) {
        for day in days {
            record_day(account, month, day, AttendanceCode::Worked, 0).unwrap();
        }
    }

    #[test]
    fn test_register_trims_and_rejects_duplicates() {
        let mut ledger = setup();
        assert!(ledger.contains("E-01"));

        let err = register_employee(&mut ledger, "E-01", "X", Money::zero(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmployeeExists(id) if id == "E-01"));

        let err = register_employee(&mut ledger, "  ", "X", Money::zero(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_begin_creates_then_resumes() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();

        assert_eq!(
            begin_or_resume(acc, june(), Utc::now()).unwrap(),
            BeginOutcome::Created
        );
        assert_eq!(
            begin_or_resume(acc, june(), Utc::now()).unwrap(),
            BeginOutcome::Resumed
        );
        assert_eq!(acc.months.len(), 1);
        assert_eq!(acc.months[0].days_in_month, 30);
    }

    #[test]
    fn test_record_day_keeps_entries_sorted_and_unique() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();

        record_day(acc, june(), 5, AttendanceCode::Worked, 0).unwrap();
        record_day(acc, june(), 2, AttendanceCode::HourlyDeduction, 4).unwrap();
        record_day(acc, june(), 3, AttendanceCode::Leave, 7).unwrap();

        let before = acc.months[0].clone();
        let err = record_day(acc, june(), 5, AttendanceCode::Absent, 0).unwrap_err();
        assert!(matches!(err, CoreError::DayAlreadyRecorded(5)));
        assert_eq!(acc.months[0], before);

        let rec = &acc.months[0];
        let days: Vec<u32> = rec.entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![2, 3, 5]);
        assert_eq!(rec.entry(2).unwrap().hours, 4);
        // hours only kept for hourly deductions
        assert_eq!(rec.entry(3).unwrap().hours, 0);
    }

    #[test]
    fn test_record_day_rejects_out_of_range_and_bad_hours() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();

        assert!(matches!(
            record_day(acc, june(), 0, AttendanceCode::Worked, 0),
            Err(CoreError::DayOutOfRange { day: 0, cap: 30 })
        ));
        assert!(matches!(
            record_day(acc, june(), 31, AttendanceCode::Worked, 0),
            Err(CoreError::DayOutOfRange { day: 31, cap: 30 })
        ));
        assert!(matches!(
            record_day(acc, june(), 1, AttendanceCode::HourlyDeduction, 13),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            record_day(acc, june(), 1, AttendanceCode::HourlyDeduction, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(acc.months[0].entries.is_empty());
    }

    #[test]
    fn test_close_blocks_on_missing_days_without_mutation() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();
        fill(acc, june(), 1..=28);

        let before = acc.months[0].clone();
        let err = close_month(acc, june(), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::IncompleteMonth { ref missing, .. } if *missing == vec![29, 30]));
        assert_eq!(acc.months[0], before);
        assert_eq!(missing_days(&acc.employee, &acc.months[0]), vec![29, 30]);
    }

    #[test]
    fn test_close_full_month_then_recompute() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();
        fill(acc, june(), 1..=30);

        let closed_at = Utc::now();
        let outcome = close_month(acc, june(), closed_at).unwrap();
        let breakdown = match outcome {
            CloseOutcome::Closed(b) => b,
            other => panic!("expected Closed, got {other:?}"),
        };
        assert_eq!(breakdown.net_salary().cents(), 3_000_000);

        let rec = acc.month(june()).unwrap().clone();
        assert!(rec.is_closed());
        assert_eq!(rec.closed_at, Some(closed_at));
        assert_eq!(rec.calculation.as_ref(), Some(&breakdown));

        let again = close_month(acc, june(), Utc::now()).unwrap();
        assert_eq!(again, CloseOutcome::AlreadyClosed(breakdown));
        assert_eq!(acc.month(june()).unwrap(), &rec);
    }

    #[test]
    fn test_closed_month_refuses_entry_and_resume() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();
        fill(acc, june(), 1..=30);
        close_month(acc, june(), Utc::now()).unwrap();

        assert!(matches!(
            begin_or_resume(acc, june(), Utc::now()),
            Err(CoreError::MonthClosed { .. })
        ));
        assert!(matches!(
            record_day(acc, june(), 1, AttendanceCode::Worked, 0),
            Err(CoreError::MonthClosed { .. })
        ));
    }

    #[test]
    fn test_termination_mid_month_caps_days() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();
        acc.employee.is_active = false;
        acc.employee.termination_date = NaiveDate::from_ymd_opt(2025, 6, 10);

        assert_eq!(effective_day_cap(&acc.employee, june()), 10);
        assert!(matches!(
            record_day(acc, june(), 11, AttendanceCode::Worked, 0),
            Err(CoreError::DayOutOfRange { day: 11, cap: 10 })
        ));

        fill(acc, june(), 1..=9);
        assert!(matches!(
            close_month(acc, june(), Utc::now()),
            Err(CoreError::IncompleteMonth { .. })
        ));

        fill(acc, june(), 10..=10);
        let outcome = close_month(acc, june(), Utc::now()).unwrap();
        let b = outcome.breakdown();
        assert_eq!(b.effective_day_cap, 10);
        assert_eq!(b.net_salary().cents(), 1_000_000);
    }

    #[test]
    fn test_month_after_termination_is_locked() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        acc.employee.is_active = false;
        acc.employee.termination_date = NaiveDate::from_ymd_opt(2025, 5, 20);

        let err = begin_or_resume(acc, june(), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::AfterTermination { .. }));
        assert!(acc.months.is_empty());

        // the termination month itself is still allowed
        let may: YearMonth = "2025-05".parse().unwrap();
        assert_eq!(
            begin_or_resume(acc, may, Utc::now()).unwrap(),
            BeginOutcome::Created
        );
    }

    #[test]
    fn test_terminated_elsewhere_waives_missing_days() {
        let mut ledger = setup();
        let acc = ledger.employee_mut("E-01").unwrap();
        begin_or_resume(acc, june(), Utc::now()).unwrap();
        fill(acc, june(), 1..=15);

        acc.employee.is_active = false;
        acc.employee.termination_date = NaiveDate::from_ymd_opt(2025, 8, 31);

        let outcome = close_month(acc, june(), Utc::now()).unwrap();
        assert_eq!(outcome.breakdown().worked_days, 15);
        assert_eq!(outcome.breakdown().net_salary().cents(), 1_500_000);
    }
}
