//! # Tally Console Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Console                                    │
//! │                                                                         │
//! │  main.rs ────► calls tally_console::run()                               │
//! │                                                                         │
//! │  lib.rs ─────► config, logging, store, corrupt-file recovery            │
//! │                                                                         │
//! │  commands/ ──► attendance, closing, view, employee, report, backup     │
//! │                                                                         │
//! │  tally-store ► tally.json + backups/tally_backup_*.json                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Load configuration (tally.toml, TALLY_* env)
//! 2. Initialize tracing (stderr)
//! 3. Open the record store, recovering a corrupt data file if needed
//! 4. Run the main menu

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match tally_console::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally: {}", err);
            ExitCode::FAILURE
        }
    }
}
