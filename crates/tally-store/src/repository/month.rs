//! # Month Repository
//!
//! Store operations on monthly records: attendance entry, closing, views and
//! the monthly report.
//!
//! ## Attendance Entry Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin_or_resume("E-01", 2025-06)                                       │
//! │       │  Created → saved     Resumed → nothing written                  │
//! │       ▼                                                                 │
//! │  missing_days(...)  → [1, 2, ..., 30]                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record_day(.., 1, W)   load → rule → backup → save                     │
//! │  record_day(.., 2, D,3) load → rule → backup → save                     │
//! │  ...                   (operator may stop with q; saved days remain)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close(..)  → CloseOutcome::Closed(breakdown), saved                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tally_core::lifecycle::{self, BeginOutcome, CloseOutcome};
use tally_core::report::{self, MonthlyReport};
use tally_core::{AttendanceCode, Employee, MonthlyRecord, PayrollBreakdown, YearMonth};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Repository for monthly records.
#[derive(Debug, Clone, Copy)]
pub struct MonthRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> MonthRepository<'a> {
    /// Creates a new MonthRepository.
    pub fn new(store: &'a RecordStore) -> Self {
        MonthRepository { store }
    }

    /// Opens `month` for entry, or resumes it.
    ///
    /// A newly created record is persisted immediately; resuming writes
    /// nothing.
    pub fn begin_or_resume(
        &self,
        employee_id: &str,
        month: YearMonth,
    ) -> StoreResult<(BeginOutcome, MonthlyRecord)> {
        let mut ledger = self.store.load()?;
        let account = ledger.employee_mut(employee_id)?;
        let outcome = lifecycle::begin_or_resume(account, month, Utc::now())?;
        let record = account.require_month(month)?.clone();

        match outcome {
            BeginOutcome::Created => {
                self.store.save(&ledger)?;
                info!(employee_id = %employee_id, %month, days = record.days_in_month, "Month opened");
            }
            BeginOutcome::Resumed => {
                debug!(employee_id = %employee_id, %month, entries = record.entries.len(), "Month resumed");
            }
        }
        Ok((outcome, record))
    }

    /// Appends one day's code and persists it.
    pub fn record_day(
        &self,
        employee_id: &str,
        month: YearMonth,
        day: u32,
        code: AttendanceCode,
        hours: u32,
    ) -> StoreResult<()> {
        self.store.update(|ledger| {
            let account = ledger.employee_mut(employee_id)?;
            lifecycle::record_day(account, month, day, code, hours)
        })?;

        debug!(employee_id = %employee_id, %month, day, ?code, hours, "Day recorded");
        Ok(())
    }

    /// Days still without an entry, up to the effective day cap.
    pub fn missing_days(&self, employee_id: &str, month: YearMonth) -> StoreResult<Vec<u32>> {
        let ledger = self.store.load()?;
        let account = ledger.employee(employee_id)?;
        let record = account.require_month(month)?;
        Ok(lifecycle::missing_days(&account.employee, record))
    }

    /// Calculates and closes the month.
    ///
    /// An already-closed month is recomputed and nothing is written.
    pub fn close(&self, employee_id: &str, month: YearMonth) -> StoreResult<CloseOutcome> {
        let mut ledger = self.store.load()?;
        let account = ledger.employee_mut(employee_id)?;
        let outcome = lifecycle::close_month(account, month, Utc::now())?;

        match &outcome {
            CloseOutcome::Closed(breakdown) => {
                self.store.save(&ledger)?;
                info!(
                    employee_id = %employee_id,
                    %month,
                    net = %breakdown.net_salary(),
                    cap = breakdown.effective_day_cap,
                    "Month closed"
                );
            }
            CloseOutcome::AlreadyClosed(_) => {
                debug!(employee_id = %employee_id, %month, "Month already closed, recomputed only");
            }
        }
        Ok(outcome)
    }

    /// Computes the breakdown without closing anything.
    pub fn preview(&self, employee_id: &str, month: YearMonth) -> StoreResult<PayrollBreakdown> {
        let ledger = self.store.load()?;
        let account = ledger.employee(employee_id)?;
        let record = account.require_month(month)?;
        Ok(lifecycle::preview(&account.employee, record)?)
    }

    /// One record with its owning profile.
    pub fn get(&self, employee_id: &str, month: YearMonth) -> StoreResult<(Employee, MonthlyRecord)> {
        let ledger = self.store.load()?;
        let account = ledger.employee(employee_id)?;
        let record = account.require_month(month)?.clone();
        Ok((account.employee.clone(), record))
    }

    /// The monthly report for `month`.
    pub fn report(&self, month: YearMonth) -> StoreResult<MonthlyReport> {
        let ledger = self.store.load()?;
        Ok(report::monthly_report(&ledger, month))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
