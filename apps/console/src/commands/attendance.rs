//! # Attendance Entry
//!
//! Menu option 1: pick or register an employee, open or resume a month,
//! then enter one code per missing day.
//!
//! ## Day Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Day  7 Sat (weekend): W      → record_day(7, Worked)   saved           │
//! │  Day  8 Sun (weekend): d                                                │
//! │    Hours to deduct [1-12]: 3  → record_day(8, HourlyDeduction, 3) saved │
//! │  Day  9 Mon: x                                                          │
//! │    ✗ unknown code 'x'         (re-prompt, nothing written)              │
//! │  Day  9 Mon: q                → stop; days 7 and 8 stay saved           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each day is written as soon as it is entered, so an interrupted session
//! loses at most the day being typed.

use std::io::{BufRead, Write};

use tally_core::calendar::{is_weekend, weekday_label};
use tally_core::lifecycle::BeginOutcome;
use tally_core::validation;
use tally_core::{AttendanceCode, Employee, YearMonth, MAX_DEDUCTION_HOURS, MIN_DEDUCTION_HOURS};
use tally_store::RecordStore;

use super::{choose_employee, current_month};
use crate::error::ConsoleResult;
use crate::prompt::Prompt;

/// What the operator typed for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayInput {
    Code(AttendanceCode),
    Stop,
}

pub fn enter<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Enter / resume attendance ==")?;

    let employees = store.employees().list()?;
    let employee = if employees.is_empty() {
        prompt.say("No employees yet. Register the first one.")?;
        register(store, prompt)?
    } else {
        match choose_employee(prompt, &employees, "Register a new employee")? {
            Some(index) => employees[index].clone(),
            None => register(store, prompt)?,
        }
    };

    let account = store.employees().get(&employee.id)?;
    if !account.months.is_empty() {
        let existing = account
            .months
            .iter()
            .map(|r| format!("{} ({})", r.year_month, r.status))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.say(format_args!("Existing months: {}", existing))?;
    }

    let default = current_month();
    let month = prompt.month(&format!("Month [YYYY-MM, ENTER for {}]: ", default), default)?;

    let (outcome, record) = store.months().begin_or_resume(&employee.id, month)?;
    match outcome {
        BeginOutcome::Created => prompt.say(format_args!(
            "Started {} for {} ({} days).",
            month, employee.full_name, record.days_in_month
        ))?,
        BeginOutcome::Resumed => prompt.say(format_args!(
            "Resuming {} for {}: {} days already entered.",
            month,
            employee.full_name,
            record.entries.len()
        ))?,
    }

    let missing = store.months().missing_days(&employee.id, month)?;
    if missing.is_empty() {
        prompt.say("Every day is entered. Close the month from the main menu.")?;
        return Ok(());
    }

    prompt.say(legend())?;

    let mut saved = 0;
    for day in missing {
        let code = match ask_day(prompt, month, day)? {
            DayInput::Code(code) => code,
            DayInput::Stop => {
                prompt.say(format_args!(
                    "Stopped. {} day(s) saved this session; resume any time.",
                    saved
                ))?;
                return Ok(());
            }
        };

        let hours = if code.takes_hours() {
            prompt.number(
                &format!(
                    "  Hours to deduct [{}-{}]: ",
                    MIN_DEDUCTION_HOURS, MAX_DEDUCTION_HOURS
                ),
                MIN_DEDUCTION_HOURS,
                MAX_DEDUCTION_HOURS,
            )?
        } else {
            0
        };

        store
            .months()
            .record_day(&employee.id, month, day, code, hours)?;
        saved += 1;
    }

    prompt.say(format_args!("✓ All days entered for {}.", month))?;
    let projected = store.months().preview(&employee.id, month)?;
    prompt.say(format_args!(
        "Projected net salary: {} (close the month to make it final)",
        projected.net_salary()
    ))?;
    Ok(())
}

/// Registers a new employee from prompted id, name and salary.
fn register<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<Employee> {
    let id = prompt.text("Employee ID: ", validation::validate_employee_id)?;
    let name = prompt.text("Full name: ", validation::validate_full_name)?;
    let salary = prompt.money("Monthly gross salary: ")?;

    let employee = store.employees().register(&id, &name, salary)?;
    prompt.say(format_args!(
        "✓ Registered {} {} ({})",
        employee.id,
        employee.full_name,
        employee.gross_salary()
    ))?;
    Ok(employee)
}

fn legend() -> String {
    let codes = AttendanceCode::ALL
        .iter()
        .map(|code| format!("{}={}", code.key(), code.label()))
        .collect::<Vec<_>>()
        .join("  ");
    format!("Codes: {}  q=stop", codes)
}

fn ask_day<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    month: YearMonth,
    day: u32,
) -> ConsoleResult<DayInput> {
    let weekday = weekday_label(month, day).unwrap_or("");
    let weekend = if is_weekend(month, day) { " (weekend)" } else { "" };
    let label = format!("Day {:>2} {}{}: ", day, weekday, weekend);
    prompt.parsed(&label, parse_day_input)
}

fn parse_day_input(raw: &str) -> Result<DayInput, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some('q' | 'Q'), None) => Ok(DayInput::Stop),
        (Some(key), None) => AttendanceCode::from_key(key)
            .map(DayInput::Code)
            .ok_or_else(|| format!("unknown code '{}'", key)),
        _ => Err("enter one of W, L, A, H, D, P, or q to stop".to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;
    use tally_core::MonthStatus;
    use tempfile::TempDir;

    fn june() -> YearMonth {
        "2025-06".parse().unwrap()
    }

    #[test]
    fn test_parse_day_input() {
        assert_eq!(parse_day_input("w"), Ok(DayInput::Code(AttendanceCode::Worked)));
        assert_eq!(parse_day_input("P"), Ok(DayInput::Code(AttendanceCode::Holiday)));
        assert_eq!(parse_day_input("Q"), Ok(DayInput::Stop));
        assert!(parse_day_input("x").is_err());
        assert!(parse_day_input("WW").is_err());
        assert!(parse_day_input("").is_err());
    }

    #[test]
    fn test_register_then_full_month() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let input = format!("E-01\nAda Byron\n30000\n2025-06\n{}", days("W", 30));
        let mut p = prompt(&input);
        enter(&store, &mut p).unwrap();

        let (employee, record) = store.months().get("E-01", june()).unwrap();
        assert_eq!(employee.full_name, "Ada Byron");
        assert_eq!(record.entries.len(), 30);
        assert_eq!(record.status, MonthStatus::Open);

        let out = output(p);
        assert!(out.contains("✓ Registered E-01 Ada Byron (30000.00)"));
        assert!(out.contains("Started 2025-06 for Ada Byron (30 days)."));
        assert!(out.contains("Day  7 Sat (weekend): "));
        assert!(out.contains("Projected net salary: 30000.00"));
    }

    #[test]
    fn test_stop_keeps_saved_days_and_resume_continues() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);

        // day 1 worked, day 2 hourly deduction (bad hours first), then stop
        let mut p = prompt("1\n2025-06\nW\nD\n15\n3\nq\n");
        enter(&store, &mut p).unwrap();
        assert!(output(p).contains("Stopped. 2 day(s) saved"));

        let (_, record) = store.months().get("E-01", june()).unwrap();
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entry(2).unwrap().hours, 3);

        let mut p = prompt("1\n2025-06\nL\nq\n");
        enter(&store, &mut p).unwrap();
        let out = output(p);
        assert!(out.contains("Existing months: 2025-06 (OPEN)"));
        assert!(out.contains("Resuming 2025-06 for Ada Byron: 2 days already entered."));
        assert!(out.contains("Day  3 Tue: "));

        let (_, record) = store.months().get("E-01", june()).unwrap();
        assert_eq!(record.entry(3).unwrap().code, AttendanceCode::Leave);
    }

    #[test]
    fn test_terminated_month_stops_at_termination_day() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .terminate("E-01", chrono::NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .unwrap();

        let input = format!("1\n2025-06\n{}", days("W", 10));
        let mut p = prompt(&input);
        enter(&store, &mut p).unwrap();

        let out = output(p);
        assert!(!out.contains("Day 11"));
        assert!(out.contains("Projected net salary: 10000.00"));
    }

    #[test]
    fn test_complete_month_has_nothing_to_enter() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        let input = format!("1\n2025-06\n{}", days("W", 30));
        enter(&store, &mut prompt(&input)).unwrap();

        let mut p = prompt("1\n2025-06\n");
        enter(&store, &mut p).unwrap();
        assert!(output(p).contains("Every day is entered."));
    }
}
