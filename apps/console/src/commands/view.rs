//! # Record View
//!
//! Menu option 3 and the renderers shared with closing.
//!
//! ## Rendered Record
//! ```text
//! ──────────────────────────────────────────────────
//! Employee:     E-01  Ada Byron
//! Month:        2025-06 (30 days)
//! Gross salary: 30000.00
//! Employment:   terminated 2025-06-10
//! Status:       CLOSED (closed 2025-07-01 09:12 UTC)
//! Calculation:
//!   Daily rate                    1000.00
//!   ...
//!   Net salary                   10000.00
//! Entries:
//!   01 Sun  W  Worked
//!   02 Mon  D  Hourly deduction (3 h)
//! ```

use std::io::{self, BufRead, Write};

use tally_core::calendar::weekday_label;
use tally_core::{Employee, MonthlyRecord, PayrollBreakdown};
use tally_store::RecordStore;

use super::{choose_employee, choose_record, employment_label};
use crate::error::ConsoleResult;
use crate::prompt::Prompt;

const RULE: &str = "──────────────────────────────────────────────────";

pub fn view<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== View records ==")?;

    let employees = store.employees().list()?;
    if employees.is_empty() {
        prompt.say("No employees registered yet.")?;
        return Ok(());
    }
    let Some(index) = choose_employee(prompt, &employees, "Back")? else {
        return Ok(());
    };

    let account = store.employees().get(&employees[index].id)?;
    if account.months.is_empty() {
        prompt.say(format_args!("{} has no monthly records.", account.employee.id))?;
        return Ok(());
    }

    let records: Vec<&MonthlyRecord> = account.months.iter().collect();
    match choose_record(prompt, &records, "All months")? {
        Some(i) => render_record(prompt.out(), &account.employee, records[i])?,
        None => {
            for record in &records {
                render_record(prompt.out(), &account.employee, record)?;
            }
        }
    }
    Ok(())
}

/// Full detail of one record.
pub fn render_record<W: Write>(
    out: &mut W,
    employee: &Employee,
    record: &MonthlyRecord,
) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Employee:     {}  {}", record.employee_id, record.full_name)?;
    writeln!(
        out,
        "Month:        {} ({} days)",
        record.year_month, record.days_in_month
    )?;
    writeln!(out, "Gross salary: {}", record.gross_salary())?;
    writeln!(out, "Employment:   {}", employment_label(employee))?;
    match record.closed_at {
        Some(at) => writeln!(
            out,
            "Status:       {} (closed {})",
            record.status,
            at.format("%Y-%m-%d %H:%M UTC")
        )?,
        None => writeln!(out, "Status:       {}", record.status)?,
    }

    match &record.calculation {
        Some(breakdown) => {
            writeln!(out, "Calculation:")?;
            render_breakdown(out, breakdown)?;
        }
        None => writeln!(out, "Calculation:  not closed yet")?,
    }

    if record.entries.is_empty() {
        writeln!(out, "Entries:      none")?;
    } else {
        writeln!(out, "Entries:")?;
        for entry in &record.entries {
            let weekday = weekday_label(record.year_month, entry.day).unwrap_or("   ");
            write!(
                out,
                "  {:02} {}  {}  {}",
                entry.day,
                weekday,
                entry.code.key(),
                entry.code.label()
            )?;
            if entry.code.takes_hours() {
                write!(out, " ({} h)", entry.hours)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Payroll breakdown lines, two-space indented.
pub fn render_breakdown<W: Write>(out: &mut W, b: &PayrollBreakdown) -> io::Result<()> {
    row(out, "Daily rate", None, b.daily_rate().to_string())?;
    row(out, "Hourly rate", None, b.hourly_rate().to_string())?;
    row(out, "Payroll days", Some(b.effective_day_cap), String::new())?;
    row(out, "Worked", Some(b.worked_days), cents(b.worked_pay_cents))?;
    row(out, "Half days", Some(b.half_days), cents(b.half_day_pay_cents))?;
    row(out, "Public holidays", Some(b.holiday_days), cents(b.holiday_pay_cents))?;
    row(out, "Leave", Some(b.leave_days), minus(b.leave_deduction_cents))?;
    row(out, "Absence (x2)", Some(b.absent_days), minus(b.absence_deduction_cents))?;
    row(
        out,
        "Hourly deductions (h)",
        Some(b.deduction_hours),
        minus(b.hourly_deduction_cents),
    )?;
    row(out, "Gross equivalent", None, b.total_gross_equivalent().to_string())?;
    row(out, "Total deductions", None, minus(b.total_deductions().cents()))?;
    row(out, "Net salary", None, b.net_salary().to_string())
}

fn row<W: Write>(out: &mut W, label: &str, count: Option<u32>, amount: String) -> io::Result<()> {
    let count = count.map(|c| c.to_string()).unwrap_or_default();
    writeln!(out, "  {:<22}{:>5}  {:>14}", label, count, amount)
}

fn cents(amount: i64) -> String {
    tally_core::Money::from_cents(amount).to_string()
}

fn minus(amount: i64) -> String {
    format!("-{}", cents(amount))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;
    use tally_core::{AttendanceCode, YearMonth};
    use tempfile::TempDir;

    fn june() -> YearMonth {
        "2025-06".parse().unwrap()
    }

    fn fill_june(store: &RecordStore) {
        let months = store.months();
        months.begin_or_resume("E-01", june()).unwrap();
        for day in 1..=30 {
            let (code, hours) = if day == 2 {
                (AttendanceCode::HourlyDeduction, 3)
            } else {
                (AttendanceCode::Worked, 0)
            };
            months.record_day("E-01", june(), day, code, hours).unwrap();
        }
    }

    #[test]
    fn test_view_open_record() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store.months().begin_or_resume("E-01", june()).unwrap();
        store
            .months()
            .record_day("E-01", june(), 1, AttendanceCode::Worked, 0)
            .unwrap();

        let mut p = prompt("1\n1\n");
        view(&store, &mut p).unwrap();

        let out = output(p);
        assert!(out.contains("Employee:     E-01  Ada Byron"));
        assert!(out.contains("Month:        2025-06 (30 days)"));
        assert!(out.contains("Employment:   active"));
        assert!(out.contains("Status:       OPEN"));
        assert!(out.contains("Calculation:  not closed yet"));
        assert!(out.contains("  01 Sun  W  Worked"));
    }

    #[test]
    fn test_view_closed_record_shows_breakdown() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        fill_june(&store);
        store.months().close("E-01", june()).unwrap();

        let mut p = prompt("1\n0\n");
        view(&store, &mut p).unwrap();

        let out = output(p);
        assert!(out.contains("Status:       CLOSED (closed "));
        assert!(out.contains("Daily rate"));
        assert!(out.contains("1000.00"));
        assert!(out.contains("  02 Mon  D  Hourly deduction (3 h)"));
        assert!(out.contains("Net salary"));
    }

    #[test]
    fn test_view_without_records() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);

        let mut p = prompt("1\n");
        view(&store, &mut p).unwrap();
        assert!(output(p).contains("E-01 has no monthly records."));
    }

    #[test]
    fn test_view_without_employees() {
        let dir = TempDir::new().unwrap();
        let mut p = prompt("");
        view(&store(&dir), &mut p).unwrap();
        assert!(output(p).contains("No employees registered yet."));
    }
}
