use std::result::Result as StdResult;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::domain::ExpenseId;

/// Unified error type for the domain, store, and reporting layers.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error(
        "Insufficient data: {actual} expense(s) recorded, at least {required} are needed for a forecast"
    )]
    InsufficientData { required: usize, actual: usize },
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

/// Errors that abort the shell itself rather than a single command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
