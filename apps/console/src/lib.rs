//! # Tally Console Library
//!
//! Core library for the Tally interactive console.
//! `run()` wires configuration, logging and the record store to the menu.
//!
//! ## Module Organization
//! ```text
//! tally_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── prompt.rs       ◄─── Validated line input, re-prompt on error
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── AppConfig (defaults → tally.toml → env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Main menu loop, shared pickers
//! │   ├── attendance.rs ◄─ Registration and day entry
//! │   ├── closing.rs  ◄─── Month closing
//! │   ├── view.rs     ◄─── Record detail
//! │   ├── employee.rs ◄─── Termination and edits
//! │   ├── report.rs   ◄─── Monthly report
//! │   └── backup.rs   ◄─── Backups and corrupt-file recovery
//! └── error.rs        ◄─── Console error type for commands
//! ```
//!
//! ## I/O Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── menus, prompts, reports (Prompt<StdinLock, Stdout>)        │
//! │  stderr  ◄── tracing events (filtered by RUST_LOG or [logging] filter) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod prompt;
pub mod state;

use std::io;

use tally_store::RecordStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use commands::{run_menu, MenuAction};
pub use error::{ConsoleError, ConsoleResult, ErrorCode};
pub use prompt::Prompt;
pub use state::AppConfig;

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → tally.toml → TALLY_* environment                       │
/// │     • On failure: defaults + environment, warning logged                │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • RUST_LOG, else [logging] filter (default: warn,tally=info)        │
/// │                                                                         │
/// │  3. Open Record Store ────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/tally/tally.json                            │
/// │     • Missing file = empty ledger                                       │
/// │     • Unreadable file = offer a backup restore, else start empty        │
/// │                                                                         │
/// │  4. Run Menu ─────────────────────────────────────────────────────────► │
/// │     • Until Exit or end of input                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ConsoleResult<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::from_env(), Some(err)),
    };

    init_tracing(&config.logging.filter);
    if let Some(err) = config_error {
        warn!(error = %err, "Configuration not loaded, using defaults");
    }

    info!("Starting Tally console");

    let store = RecordStore::open(config.store_config());
    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    match commands::backup::check_data_file(&store, &mut prompt) {
        Err(e) if e.is_input_closed() => return Ok(()),
        other => other?,
    }

    run_menu(&store, &config.console, &mut prompt)?;

    info!("Tally console stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages for everything
/// - `RUST_LOG=tally=debug` - Per-day writes and loads for tally crates
/// - Default: `warn,tally=info`
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(state::config::DEFAULT_LOG_FILTER));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    if let Err(err) = result {
        eprintln!("Logging disabled: {}", err);
    }
}
