//! # Console Commands Module
//!
//! Every action reachable from the main menu.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (menu loop, shared pickers)
//! ├── attendance.rs  ◄─── 1. Enter / resume attendance (and registration)
//! ├── closing.rs     ◄─── 2. Close a month
//! ├── view.rs        ◄─── 3. View records
//! ├── employee.rs    ◄─── 4. Terminate, 5. Edit employee
//! ├── report.rs      ◄─── 6. Monthly report
//! └── backup.rs      ◄─── 7. Backups, and startup recovery
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Command Flow                                 │
//! │                                                                         │
//! │  run_menu                                                               │
//! │   │  print menu, read 1..=8                                             │
//! │   ▼                                                                     │
//! │  fn command<R: BufRead, W: Write>(                                      │
//! │      store: &RecordStore,       ◄── repositories, backups               │
//! │      prompt: &mut Prompt<R, W>, ◄── validated input                     │
//! │  ) -> ConsoleResult<()>                                                 │
//! │   │                                                                     │
//! │   ├── Ok            → "Press ENTER to continue..."                      │
//! │   ├── Err(closed)   → leave the menu                                    │
//! │   └── Err(other)    → "✗ message", back to the menu                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod attendance;
pub mod backup;
pub mod closing;
pub mod employee;
pub mod report;
pub mod view;

use std::io::{BufRead, Write};

use chrono::Local;
use tally_core::{Employee, MonthlyRecord, YearMonth};
use tally_store::RecordStore;
use tracing::debug;

use crate::error::ConsoleResult;
use crate::prompt::Prompt;
use crate::state::ConsoleSettings;

// =============================================================================
// Main Menu
// =============================================================================

/// The eight main-menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    EnterAttendance,
    CloseMonth,
    ViewRecord,
    TerminateEmployee,
    EditEmployee,
    MonthlyReport,
    ManageBackups,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 8] = [
        MenuAction::EnterAttendance,
        MenuAction::CloseMonth,
        MenuAction::ViewRecord,
        MenuAction::TerminateEmployee,
        MenuAction::EditEmployee,
        MenuAction::MonthlyReport,
        MenuAction::ManageBackups,
        MenuAction::Exit,
    ];

    /// Menu number, starting at 1.
    pub fn number(&self) -> u32 {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    pub const fn label(&self) -> &'static str {
        match self {
            MenuAction::EnterAttendance => "Enter / resume attendance",
            MenuAction::CloseMonth => "Close a month",
            MenuAction::ViewRecord => "View records",
            MenuAction::TerminateEmployee => "Terminate an employee",
            MenuAction::EditEmployee => "Edit an employee",
            MenuAction::MonthlyReport => "Monthly report",
            MenuAction::ManageBackups => "Backups",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Runs the main menu until Exit or end of input.
///
/// Command failures are printed and the menu continues.
pub fn run_menu<R: BufRead, W: Write>(
    store: &RecordStore,
    settings: &ConsoleSettings,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    loop {
        if settings.clear_screen {
            prompt.clear_screen()?;
        }

        prompt.blank()?;
        prompt.say("=== Tally: timesheets & payroll ===")?;
        for action in MenuAction::ALL {
            prompt.say(format_args!("  {}) {}", action.number(), action.label()))?;
        }

        let max = MenuAction::ALL.len() as u32;
        let choice = match prompt.number("Choose an option: ", 1, max) {
            Ok(choice) => choice,
            Err(err) if err.is_input_closed() => return Ok(()),
            Err(err) => return Err(err),
        };
        let Some(action) = MenuAction::from_number(choice) else {
            continue;
        };

        if action == MenuAction::Exit {
            prompt.say("Goodbye.")?;
            return Ok(());
        }

        prompt.blank()?;
        match dispatch(action, store, prompt) {
            Ok(()) => {}
            Err(err) if err.is_input_closed() => return Ok(()),
            Err(err) => {
                debug!(?action, code = ?err.code, message = %err.message, "Command failed");
                prompt.say(format_args!("✗ {}", err.message))?;
            }
        }

        if settings.pause_after_action {
            match prompt.pause() {
                Ok(()) => {}
                Err(err) if err.is_input_closed() => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }
}

fn dispatch<R: BufRead, W: Write>(
    action: MenuAction,
    store: &RecordStore,
    prompt: &mut Prompt<R, W>,
) -> ConsoleResult<()> {
    match action {
        MenuAction::EnterAttendance => attendance::enter(store, prompt),
        MenuAction::CloseMonth => closing::close(store, prompt),
        MenuAction::ViewRecord => view::view(store, prompt),
        MenuAction::TerminateEmployee => employee::terminate(store, prompt),
        MenuAction::EditEmployee => employee::edit(store, prompt),
        MenuAction::MonthlyReport => report::show(store, prompt),
        MenuAction::ManageBackups => backup::manage(store, prompt),
        MenuAction::Exit => Ok(()),
    }
}

// =============================================================================
// Shared Pickers
// =============================================================================

/// The month containing today's local date.
pub(crate) fn current_month() -> YearMonth {
    YearMonth::of(Local::now().date_naive())
}

/// "active" or "terminated 2025-06-10".
pub(crate) fn employment_label(employee: &Employee) -> String {
    match employee.termination_date {
        Some(date) if !employee.is_active => format!("terminated {}", date),
        _ => "active".to_string(),
    }
}

/// Numbered employee list with a `0)` entry. `None` means 0 was chosen.
pub(crate) fn choose_employee<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    employees: &[Employee],
    zero_label: &str,
) -> ConsoleResult<Option<usize>> {
    for (i, employee) in employees.iter().enumerate() {
        prompt.say(format_args!(
            "  {}) {:<10} {:<28} [{}]",
            i + 1,
            employee.id,
            employee.full_name,
            employment_label(employee)
        ))?;
    }
    prompt.say(format_args!("  0) {}", zero_label))?;

    let choice = prompt.number("Employee: ", 0, employees.len() as u32)?;
    Ok(choice.checked_sub(1).map(|i| i as usize))
}

/// Numbered month list with a `0)` entry. `None` means 0 was chosen.
pub(crate) fn choose_record<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    records: &[&MonthlyRecord],
    zero_label: &str,
) -> ConsoleResult<Option<usize>> {
    for (i, record) in records.iter().enumerate() {
        prompt.say(format_args!(
            "  {}) {}  {:<6}  {} of {} days entered",
            i + 1,
            record.year_month,
            record.status.to_string(),
            record.entries.len(),
            record.days_in_month
        ))?;
    }
    prompt.say(format_args!("  0) {}", zero_label))?;

    let choice = prompt.number("Month: ", 0, records.len() as u32)?;
    Ok(choice.checked_sub(1).map(|i| i as usize))
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use tally_core::Money;
    use tally_store::{RecordStore, StoreConfig};
    use tempfile::TempDir;

    use crate::prompt::Prompt;

    pub type TestPrompt = Prompt<Cursor<Vec<u8>>, Vec<u8>>;

    pub fn prompt(input: &str) -> TestPrompt {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    pub fn output(prompt: TestPrompt) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    pub fn store(dir: &TempDir) -> RecordStore {
        RecordStore::open(StoreConfig::new(dir.path().join("tally.json")))
    }

    /// Store with E-01 (30000.00) registered.
    pub fn store_with_employee(dir: &TempDir) -> RecordStore {
        let store = store(dir);
        store
            .employees()
            .register("E-01", "Ada Byron", Money::from_cents(3_000_000))
            .unwrap();
        store
    }

    /// `n` lines of `code`.
    pub fn days(code: &str, n: usize) -> String {
        format!("{}\n", code).repeat(n)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
