//! # Monthly Report
//!
//! One line per employee that has a record for the requested month.
//!
//! ```text
//!   Name          ID     Status   Gross      Net        Deductions
//!   Ada Byron     E-01   CLOSED   30000.00   5000.00    15000.00
//!   Bob Stone     E-02   OPEN     25000.00   -          -
//!   ─────────────────────────────────────────────────────────────
//!   totals:  gross over every line, net/deductions over CLOSED lines
//! ```

use crate::calendar::YearMonth;
use crate::money::Money;
use crate::types::{Ledger, MonthStatus};

/// A single employee's line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub employee_id: String,
    pub full_name: String,
    pub status: MonthStatus,
    pub gross_salary: Money,
    /// Present only for closed records.
    pub net_salary: Option<Money>,
    /// Leave + absence + hourly deductions, closed records only.
    pub deductions: Option<Money>,
}

/// The whole report for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub year_month: YearMonth,
    /// Sorted by name, then identifier.
    pub lines: Vec<ReportLine>,
    pub total_gross: Money,
    pub total_net: Money,
    pub total_deductions: Money,
}

impl MonthlyReport {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn closed_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.status == MonthStatus::Closed)
            .count()
    }
}

/// Builds the report for `year_month`.
pub fn monthly_report(ledger: &Ledger, year_month: YearMonth) -> MonthlyReport {
    let mut lines: Vec<ReportLine> = ledger
        .records_for(year_month)
        .into_iter()
        .map(|(employee, record)| {
            let calc = record.calculation.as_ref().filter(|_| record.is_closed());
            ReportLine {
                employee_id: employee.id.clone(),
                full_name: record.full_name.clone(),
                status: record.status,
                gross_salary: record.gross_salary(),
                net_salary: calc.map(|c| c.net_salary()),
                deductions: calc.map(|c| c.total_deductions()),
            }
        })
        .collect();

    lines.sort_by(|a, b| {
        a.full_name
            .cmp(&b.full_name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });

    let total_gross = lines.iter().map(|l| l.gross_salary).sum();
    let total_net = lines.iter().filter_map(|l| l.net_salary).sum();
    let total_deductions = lines.iter().filter_map(|l| l.deductions).sum();

    MonthlyReport {
        year_month,
        lines,
        total_gross,
        total_net,
        total_deductions,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
