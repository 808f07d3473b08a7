//! # State Module
//!
//! Process-wide state set up once at startup.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run()                                                                  │
//! │   ├── AppConfig::load()          ◄── config.rs                          │
//! │   ├── RecordStore::open(config.store_config())                          │
//! │   └── run_menu(&store, &config.console, &mut prompt)                    │
//! │                                                                         │
//! │  Nothing here is shared across threads; the console is a single        │
//! │  synchronous loop and the store re-reads the file on every operation.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;

pub use config::{AppConfig, ConfigError, ConsoleSettings, LoggingSettings, StorageSettings};
