//! # Monthly Report
//!
//! Menu option 6: every employee with a record for one month.
//!
//! ```text
//! Report for 2025-06
//! ID         Name                       Status          Gross            Net     Deductions
//! E-01       Ada Byron                  CLOSED       30000.00       27000.00        3000.00
//! E-02       Alan Turing                OPEN         25000.00              -              -
//! Totals (1 of 2 closed)                             55000.00       27000.00        3000.00
//! ```
//!
//! Net and deduction totals only cover CLOSED records.

use std::io::{self, BufRead, Write};

use tally_core::report::MonthlyReport;
use tally_core::Money;
use tally_store::RecordStore;

use super::current_month;
use crate::error::ConsoleResult;
use crate::prompt::Prompt;

pub fn show<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Monthly report ==")?;

    let default = current_month();
    let month = prompt.month(&format!("Month [YYYY-MM, ENTER for {}]: ", default), default)?;

    let report = store.months().report(month)?;
    if report.is_empty() {
        prompt.say(format_args!("No records for {}.", month))?;
        return Ok(());
    }
    render_report(prompt.out(), &report)?;
    Ok(())
}

pub fn render_report<W: Write>(out: &mut W, report: &MonthlyReport) -> io::Result<()> {
    writeln!(out, "Report for {}", report.year_month)?;
    writeln!(
        out,
        "{:<10} {:<26} {:<6} {:>14} {:>14} {:>14}",
        "ID", "Name", "Status", "Gross", "Net", "Deductions"
    )?;

    for line in &report.lines {
        writeln!(
            out,
            "{:<10} {:<26} {:<6} {:>14} {:>14} {:>14}",
            line.employee_id,
            truncate(&line.full_name, 26),
            line.status.to_string(),
            line.gross_salary.to_string(),
            or_dash(line.net_salary),
            or_dash(line.deductions)
        )?;
    }

    writeln!(
        out,
        "{:<44} {:>14} {:>14} {:>14}",
        format!("Totals ({} of {} closed)", report.closed_count(), report.lines.len()),
        report.total_gross.to_string(),
        report.total_net.to_string(),
        report.total_deductions.to_string()
    )
}

fn or_dash(amount: Option<Money>) -> String {
    amount.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
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

    #[test]
    fn test_report_open_and_closed() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        store
            .employees()
            .register("E-02", "Alan Turing", Money::from_cents(2_500_000))
            .unwrap();

        let months = store.months();
        months.begin_or_resume("E-01", june()).unwrap();
        months.begin_or_resume("E-02", june()).unwrap();
        for day in 1..=30 {
            let code = if day <= 29 {
                AttendanceCode::Worked
            } else {
                AttendanceCode::Leave
            };
            months.record_day("E-01", june(), day, code, 0).unwrap();
        }
        months.close("E-01", june()).unwrap();

        let mut p = prompt("2025-06\n");
        show(&store, &mut p).unwrap();

        let out = output(p);
        assert!(out.contains("Report for 2025-06"));
        assert!(out.contains("Ada Byron"));
        assert!(out.contains("Alan Turing"));
        assert!(out.contains("Totals (1 of 2 closed)"));
        // 55000 gross over both, net 29000 - 1000 for E-01 only
        assert!(out.contains("55000.00"));
        assert!(out.contains("28000.00"));
    }

    #[test]
    fn test_empty_month() {
        let dir = TempDir::new().unwrap();
        let store = store_with_employee(&dir);
        let mut p = prompt("2030-01\n");
        show(&store, &mut p).unwrap();
        assert!(output(p).contains("No records for 2030-01."));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("Ada", 5), "Ada");
        assert_eq!(truncate("Grace Brewster Hopper", 8), "Grace B…");
    }
}
