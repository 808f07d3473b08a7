//! # Console Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  menu option 2 (close a month)                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  ConsoleResult<()>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::Io { .. } ─────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Rule Error? ─── CoreError::IncompleteMonth ── ConsoleError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  ✗ Month 2025-06 is incomplete, missing days: 29, 30                    │
//! │  Press ENTER to continue...                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never end the session. The menu prints the message and loops;
//! only a closed input stream ([`ErrorCode::InputClosed`]) stops it.

use std::fmt;

use tally_core::{CoreError, ValidationError};
use tally_store::StoreError;

use crate::state::ConfigError;

/// Error returned from console commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

/// Error codes for console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Employee or monthly record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A business rule refused the operation
    BusinessRule,

    /// Reading or writing the data file failed
    StorageError,

    /// The data file could not be parsed
    CorruptData,

    /// Configuration file or environment could not be used
    ConfigError,

    /// Standard input reached end of file
    InputClosed,

    /// Terminal I/O failed
    Internal,
}

/// Result type for console commands.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the end-of-input error.
    pub fn input_closed() -> Self {
        ConsoleError::new(ErrorCode::InputClosed, "Input closed")
    }

    /// Whether the operator's input stream is gone.
    pub fn is_input_closed(&self) -> bool {
        self.code == ErrorCode::InputClosed
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::EmployeeNotFound(_) | CoreError::RecordNotFound { .. } => ErrorCode::NotFound,
            CoreError::Validation(_) | CoreError::DayOutOfRange { .. } => ErrorCode::ValidationError,
            CoreError::EmployeeExists(_)
            | CoreError::IncompleteMonth { .. }
            | CoreError::AfterTermination { .. }
            | CoreError::MonthClosed { .. }
            | CoreError::DayAlreadyRecorded(_)
            | CoreError::AlreadyTerminated(_)
            | CoreError::AlreadyActive(_) => ErrorCode::BusinessRule,
        };
        ConsoleError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

/// Converts store errors to console errors.
impl From<StoreError> for ConsoleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core.into(),
            StoreError::Io { .. } => {
                // Log the full error, the operator gets the same text
                tracing::error!(error = %err, "Storage operation failed");
                ConsoleError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::Corrupt { .. } | StoreError::UnsupportedVersion { .. } => {
                ConsoleError::new(ErrorCode::CorruptData, err.to_string())
            }
            StoreError::BackupNotFound(_) => ConsoleError::new(ErrorCode::NotFound, err.to_string()),
        }
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal read/write failures.
impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::new(ErrorCode::Internal, format!("Terminal I/O failed: {}", err))
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ConsoleError {}

// =============================================================================
// Unit Tests
// =============================================================================
