//! Core error types for the importer.
//!
//! Parse-time errors (`InvalidBroker`, `UnknownAction`, `UnknownSymbol`,
//! `MalformedRow`) abort the whole batch. Submission-time errors
//! (`RemoteRejected`, `TransportFailure`) halt the review session they occur in.

use chrono::ParseError as ChronoParseError;
use folioport_market_data::MarketDataError;
use thiserror::Error;

use crate::review::ReviewError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the importer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid broker: {0}")]
    InvalidBroker(String),

    #[error("Unknown action {0}")]
    UnknownAction(String),

    #[error("Unknown stock name {0}")]
    UnknownSymbol(String),

    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Import rejected by the remote service (HTTP {status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Builds a `MalformedRow` error for a 1-based data row.
    pub fn malformed(row: usize, message: impl Into<String>) -> Self {
        Error::MalformedRow {
            row,
            message: message.into(),
        }
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<MarketDataError> for Error {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::SymbolNotFound(name) => Error::UnknownSymbol(name),
            MarketDataError::ParseError(message) => {
                Error::Unexpected(format!("Listing could not be parsed: {}", message))
            }
            other => Error::TransportFailure(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
