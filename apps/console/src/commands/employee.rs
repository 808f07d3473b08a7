//! # Employee Commands
//!
//! Menu options 4 (terminate) and 5 (edit).
//!
//! ## Edit Menu
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1) Rename              → profile + every monthly record                │
//! │  2) Change salary       → profile + OPEN months (CLOSED are frozen)     │
//! │  3) Reactivate          → only offered when terminated                  │
//! │  0) Back                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use tally_core::validation;
use tally_store::RecordStore;

use super::{choose_employee, employment_label};
use crate::error::ConsoleResult;
use crate::prompt::Prompt;

/// Terminates an employee after a Y/N confirmation.
pub fn terminate<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Terminate an employee ==")?;

    let employees: Vec<_> = store
        .employees()
        .list()?
        .into_iter()
        .filter(|e| e.is_active)
        .collect();
    if employees.is_empty() {
        prompt.say("No active employees.")?;
        return Ok(());
    }
    let Some(index) = choose_employee(prompt, &employees, "Back")? else {
        return Ok(());
    };
    let employee = &employees[index];

    let date = prompt.date("Last working day [YYYY-MM-DD]: ")?;
    let question = format!(
        "Terminate {} {} effective {}? Months after {} will be locked. [y/N]: ",
        employee.id,
        employee.full_name,
        date,
        date.format("%Y-%m")
    );
    if !prompt.confirm(&question)? {
        prompt.say("Cancelled.")?;
        return Ok(());
    }

    store.employees().terminate(&employee.id, date)?;
    prompt.say(format_args!("✓ {} terminated effective {}.", employee.id, date))?;
    Ok(())
}

/// Rename, salary change or reactivation.
pub fn edit<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Edit an employee ==")?;

    let employees = store.employees().list()?;
    if employees.is_empty() {
        prompt.say("No employees registered yet.")?;
        return Ok(());
    }
    let Some(index) = choose_employee(prompt, &employees, "Back")? else {
        return Ok(());
    };
    let employee = &employees[index];

    prompt.say(format_args!(
        "{} {}: salary {}, {}",
        employee.id,
        employee.full_name,
        employee.gross_salary(),
        employment_label(employee)
    ))?;
    prompt.say("  1) Rename")?;
    prompt.say("  2) Change salary")?;
    let max = if employee.is_active {
        2
    } else {
        prompt.say("  3) Reactivate")?;
        3
    };
    prompt.say("  0) Back")?;

    match prompt.number("Option: ", 0, max)? {
        1 => {
            let name = prompt.text("New full name: ", validation::validate_full_name)?;
            store.employees().rename(&employee.id, &name)?;
            prompt.say(format_args!("✓ {} is now {}.", employee.id, name))?;
        }
        2 => {
            let salary = prompt.money("New monthly gross salary: ")?;
            let updated = store.employees().update_salary(&employee.id, salary)?;
            prompt.say(format_args!(
                "✓ Salary set to {} ({} open month(s) updated, closed months unchanged).",
                salary, updated
            ))?;
        }
        3 => {
            store.employees().reactivate(&employee.id)?;
            prompt.say(format_args!("✓ {} reactivated.", employee.id))?;
        }
        _ => {}
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;
    use chrono::NaiveDate;
    use tally_core::{AttendanceCode, YearMonth};
    use tempfile::TempDir;

    fn june() -> YearMonth {
        "2025-06".parse().unwrap()
    }

    #[test]
    fn test_terminate_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);

        let mut p = prompt("1\n2025-06-10\nn\n");
        terminate(&store, &mut p).unwrap();
        assert!(output(p).contains("Cancelled."));
        assert!(store.employees().get("E-01").unwrap().employee.is_active);

        let mut p = prompt("1\n2025-06-31\n2025-06-10\ny\n");
        terminate(&store, &mut p).unwrap();
        let out = output(p);
        assert!(out.contains("Months after 2025-06 will be locked."));
        assert!(out.contains("✓ E-01 terminated effective 2025-06-10."));

        let employee = store.employees().get("E-01").unwrap().employee;
        assert!(!employee.is_active);
        assert_eq!(employee.termination_date, NaiveDate::from_ymd_opt(2025, 6, 10));
    }

    #[test]
    fn test_terminated_employees_are_not_offered() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .terminate("E-01", NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .unwrap();

        let mut p = prompt("");
        terminate(&store, &mut p).unwrap();
        assert!(output(p).contains("No active employees."));
    }

    #[test]
    fn test_rename_and_salary() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store.months().begin_or_resume("E-01", june()).unwrap();

        edit(&store, &mut prompt("1\n1\nAda Lovelace\n")).unwrap();

        let mut p = prompt("1\n2\n36000\n");
        edit(&store, &mut p).unwrap();
        assert!(output(p).contains("(1 open month(s) updated"));

        let (employee, record) = store.months().get("E-01", june()).unwrap();
        assert_eq!(employee.full_name, "Ada Lovelace");
        assert_eq!(record.full_name, "Ada Lovelace");
        assert_eq!(record.gross_salary().cents(), 3_600_000);
    }

    #[test]
    fn test_salary_change_skips_closed_months() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        let months = store.months();
        months.begin_or_resume("E-01", june()).unwrap();
        for day in 1..=30 {
            months
                .record_day("E-01", june(), day, AttendanceCode::Worked, 0)
                .unwrap();
        }
        months.close("E-01", june()).unwrap();

        let mut p = prompt("1\n2\n50000\n");
        edit(&store, &mut p).unwrap();
        assert!(output(p).contains("(0 open month(s) updated"));

        let (_, record) = months.get("E-01", june()).unwrap();
        assert_eq!(record.gross_salary().cents(), 3_000_000);
    }

    #[test]
    fn test_reactivate_only_offered_when_terminated() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);

        // option 3 is out of range while active, then back out
        let mut p = prompt("1\n3\n0\n");
        edit(&store, &mut p).unwrap();
        assert!(!output(p).contains("3) Reactivate"));

        store
            .employees()
            .terminate("E-01", NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .unwrap();
        let mut p = prompt("1\n3\n");
        edit(&store, &mut p).unwrap();
        assert!(output(p).contains("✓ E-01 reactivated."));
        assert!(store.employees().get("E-01").unwrap().employee.is_active);
    }
}
