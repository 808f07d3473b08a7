//! # Employee Repository
//!
//! Store operations on employee profiles.
//!
//! ## Key Operations
//! - Listing and lookup
//! - Registration of new employees
//! - Termination and reactivation
//! - Renames and salary updates

use chrono::{NaiveDate, Utc};
use tally_core::{employment, lifecycle, CoreError, Employee, EmployeeLedger, Money};
use tracing::info;

use crate::error::StoreResult;
use crate::store::RecordStore;

/// Repository for employee profiles.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.employees();
///
/// repo.register("E-01", "Ada Byron", Money::from_cents(3_000_000))?;
/// repo.terminate("E-01", NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmployeeRepository<'a> {
    store: &'a RecordStore,
}

impl<'a> EmployeeRepository<'a> {
    /// Creates a new EmployeeRepository.
    pub fn new(store: &'a RecordStore) -> Self {
        EmployeeRepository { store }
    }

    /// All employee profiles, ordered by identifier.
    pub fn list(&self) -> StoreResult<Vec<Employee>> {
        let ledger = self.store.load()?;
        Ok(ledger
            .employees
            .into_values()
            .map(|acc| acc.employee)
            .collect())
    }

    /// A profile together with all of its monthly records.
    pub fn get(&self, employee_id: &str) -> StoreResult<EmployeeLedger> {
        let mut ledger = self.store.load()?;
        let account = ledger
            .employees
            .remove(employee_id)
            .ok_or_else(|| CoreError::EmployeeNotFound(employee_id.to_string()))?;
        Ok(account)
    }

    /// Registers a new employee with no monthly records.
    pub fn register(
        &self,
        employee_id: &str,
        full_name: &str,
        gross_salary: Money,
    ) -> StoreResult<Employee> {
        let employee = self.store.update(|ledger| {
            lifecycle::register_employee(ledger, employee_id, full_name, gross_salary, Utc::now())
                .map(|acc| acc.employee.clone())
        })?;

        info!(employee_id = %employee.id, gross = %gross_salary, "Employee registered");
        Ok(employee)
    }

    /// Terminates an employee effective `date` (last employed day).
    pub fn terminate(&self, employee_id: &str, date: NaiveDate) -> StoreResult<()> {
        self.store.update(|ledger| {
            let account = ledger.employee_mut(employee_id)?;
            employment::terminate(account, date)
        })?;

        info!(employee_id = %employee_id, %date, "Employee terminated");
        Ok(())
    }

    /// Clears an employee's termination.
    pub fn reactivate(&self, employee_id: &str) -> StoreResult<()> {
        self.store.update(|ledger| {
            let account = ledger.employee_mut(employee_id)?;
            employment::reactivate(account)
        })?;

        info!(employee_id = %employee_id, "Employee reactivated");
        Ok(())
    }

    /// Renames the employee everywhere.
    pub fn rename(&self, employee_id: &str, full_name: &str) -> StoreResult<()> {
        self.store.update(|ledger| {
            let account = ledger.employee_mut(employee_id)?;
            employment::rename(account, full_name)
        })?;

        info!(employee_id = %employee_id, "Employee renamed");
        Ok(())
    }

    /// Updates the salary on the profile and every open month.
    ///
    /// ## Returns
    /// The number of open monthly records that were updated.
    pub fn update_salary(&self, employee_id: &str, gross_salary: Money) -> StoreResult<usize> {
        let updated = self.store.update(|ledger| {
            let account = ledger.employee_mut(employee_id)?;
            employment::update_salary(account, gross_salary)
        })?;

        info!(
            employee_id = %employee_id,
            gross = %gross_salary,
            open_months_updated = updated,
            "Salary updated"
        );
        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
