//! # Employment Changes
//!
//! Termination, reactivation and profile edits.
//!
//! The profile is the single owner of employment state. Terminating an
//! employee therefore applies to every monthly record at once, open or
//! closed, without copying anything onto the records.
//!
//! ```text
//!   ACTIVE ──terminate(date)──► TERMINATED(date) ──reactivate──► ACTIVE
//!
//!   TERMINATED(2025-06-10):
//!     2025-05   normal month
//!     2025-06   days 1..=10 only
//!     2025-07+  no new records, no new entries
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{EmployeeLedger, MonthStatus};
use crate::validation::{validate_full_name, validate_gross_salary};

/// Marks the employee as terminated with `date` as the last employed day.
///
/// Existing records are kept; months after the termination month become
/// unavailable for attendance entry.
pub fn terminate(account: &mut EmployeeLedger, date: NaiveDate) -> CoreResult<()> {
    let employee = &mut account.employee;
    if !employee.is_active || employee.termination_date.is_some() {
        return Err(CoreError::AlreadyTerminated(employee.id.clone()));
    }
    employee.is_active = false;
    employee.termination_date = Some(date);
    Ok(())
}

/// Clears the termination state.
pub fn reactivate(account: &mut EmployeeLedger) -> CoreResult<()> {
    let employee = &mut account.employee;
    if employee.is_active && employee.termination_date.is_none() {
        return Err(CoreError::AlreadyActive(employee.id.clone()));
    }
    employee.is_active = true;
    employee.termination_date = None;
    Ok(())
}

/// Renames the employee on the profile and on every record snapshot.
pub fn rename(account: &mut EmployeeLedger, full_name: &str) -> CoreResult<()> {
    let full_name = validate_full_name(full_name)?;
    for record in &mut account.months {
        record.full_name = full_name.clone();
    }
    account.employee.full_name = full_name;
    Ok(())
}

/// Sets a new gross salary on the profile and every OPEN record.
///
/// Closed records keep the salary they were closed with. Returns the number
/// of records that changed.
pub fn update_salary(account: &mut EmployeeLedger, gross_salary: Money) -> CoreResult<usize> {
    validate_gross_salary(gross_salary)?;
    account.employee.gross_salary_cents = gross_salary.cents();

    let mut updated = 0;
    for record in account
        .months
        .iter_mut()
        .filter(|r| r.status == MonthStatus::Open)
    {
        record.gross_salary_cents = gross_salary.cents();
        updated += 1;
    }
    Ok(updated)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::lifecycle::{begin_or_resume, close_month, record_day, register_employee};
    use crate::types::{AttendanceCode, Ledger};
    use chrono::Utc;

    fn ledger_with_two_months() -> Ledger {
        let mut ledger = Ledger::default();
        let acc = register_employee(
            &mut ledger,
            "E-01",
            "Ada Byron",
            Money::from_cents(3_000_000),
            Utc::now(),
        )
        .unwrap();

        let may: YearMonth = "2025-05".parse().unwrap();
        let june: YearMonth = "2025-06".parse().unwrap();
        begin_or_resume(acc, may, Utc::now()).unwrap();
        for day in 1..=31 {
            record_day(acc, may, day, AttendanceCode::Worked, 0).unwrap();
        }
        close_month(acc, may, Utc::now()).unwrap();
        begin_or_resume(acc, june, Utc::now()).unwrap();
        ledger
    }

    #[test]
    fn test_terminate_and_reactivate() {
        let mut ledger = ledger_with_two_months();
        let acc = ledger.employee_mut("E-01").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        terminate(acc, date).unwrap();
        assert!(!acc.employee.is_active);
        assert_eq!(acc.employee.termination_date, Some(date));
        // the closed May record is still there
        assert_eq!(acc.months.len(), 2);

        assert!(matches!(
            terminate(acc, date),
            Err(CoreError::AlreadyTerminated(_))
        ));

        reactivate(acc).unwrap();
        assert!(acc.employee.is_active);
        assert_eq!(acc.employee.termination_date, None);
        assert!(matches!(reactivate(acc), Err(CoreError::AlreadyActive(_))));
    }

    #[test]
    fn test_rename_updates_every_snapshot() {
        let mut ledger = ledger_with_two_months();
        let acc = ledger.employee_mut("E-01").unwrap();

        rename(acc, "  Ada Lovelace ").unwrap();
        assert_eq!(acc.employee.full_name, "Ada Lovelace");
        assert!(acc.months.iter().all(|m| m.full_name == "Ada Lovelace"));

        assert!(matches!(rename(acc, ""), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_update_salary_skips_closed_months() {
        let mut ledger = ledger_with_two_months();
        let acc = ledger.employee_mut("E-01").unwrap();

        let updated = update_salary(acc, Money::from_cents(3_600_000)).unwrap();
        assert_eq!(updated, 1);
        assert_eq!(acc.employee.gross_salary_cents, 3_600_000);
        assert_eq!(acc.months[0].gross_salary_cents, 3_000_000);
        assert_eq!(acc.months[1].gross_salary_cents, 3_600_000);
    }

    #[test]
    fn test_update_salary_rejects_out_of_range() {
        let mut ledger = ledger_with_two_months();
        let acc = ledger.employee_mut("E-01").unwrap();
        assert!(update_salary(acc, Money::from_cents(-1)).is_err());
        assert_eq!(acc.employee.gross_salary_cents, 3_000_000);
    }
}
