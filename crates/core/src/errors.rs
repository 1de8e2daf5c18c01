//! Core error types for Stockdesk.
//!
//! Price lookup failures never show up here: the market data crate reports
//! them as `PriceResult::Unavailable` and the valuation engine treats the
//! holding as unpriced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid holding: {0}")]
    InvalidHolding(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import rejected: {} invalid row(s)", .0.len())]
    ImportRejected(Vec<RowError>),

    #[error("Configuration missing or invalid: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Notes store error: {0}")]
    Notes(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field-level validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field) => Some(field),
            ValidationError::InvalidField { field, .. } => Some(field),
            ValidationError::DecimalParse(_) => None,
        }
    }
}

/// One rejected row of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// Line number in the file (the header is line 1).
    pub row: u64,
    /// Column name the problem was found in, if it is tied to one.
    pub column: Option<String>,
    pub message: String,
}

/// Errors loading the reference configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Cannot parse {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Missing key '{key}' in {path}")]
    MissingKey { path: String, key: String },

    #[error("Invalid value in {path}: {message}")]
    InvalidValue { path: String, message: String },
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::InvalidHolding(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
