//! # Month Closing
//!
//! Menu option 2. Only months that are not yet CLOSED are offered.
//! Closing refuses incomplete months and lists the missing days.

use std::io::{BufRead, Write};

use tally_core::lifecycle::CloseOutcome;
use tally_core::MonthlyRecord;
use tally_store::RecordStore;

use super::view::render_breakdown;
use super::{choose_employee, choose_record};
use crate::error::ConsoleResult;
use crate::prompt::Prompt;

pub fn close<R: BufRead, W: Write>(
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    prompt.say("== Close a month ==")?;

    let employees = store.employees().list()?;
    if employees.is_empty() {
        prompt.say("No employees registered yet.")?;
        return Ok(());
    }
    let Some(index) = choose_employee(prompt, &employees, "Back")? else {
        return Ok(());
    };
    let employee = &employees[index];

    let account = store.employees().get(&employee.id)?;
    let open: Vec<&MonthlyRecord> = account.months.iter().filter(|r| !r.is_closed()).collect();
    if open.is_empty() {
        prompt.say(format_args!("No open months for {}.", employee.id))?;
        return Ok(());
    }

    let Some(i) = choose_record(prompt, &open, "Back")? else {
        return Ok(());
    };
    let month = open[i].year_month;

    let outcome = store.months().close(&employee.id, month)?;
    match &outcome {
        CloseOutcome::Closed(_) => prompt.say(format_args!(
            "✓ {} closed for {} {}.",
            month, employee.id, employee.full_name
        ))?,
        CloseOutcome::AlreadyClosed(_) => {
            prompt.say(format_args!("{} was already closed.", month))?
        }
    }
    render_breakdown(prompt.out(), outcome.breakdown())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
