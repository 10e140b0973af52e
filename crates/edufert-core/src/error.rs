//! Error types for the indicator pipeline
//!
//! Provides the error taxonomy shared by the core and statistics crates.

use crate::types::{CountryCode, Year};
use thiserror::Error;

/// Core error type for loading, joining and summarizing indicator data
#[derive(Error, Debug)]
pub enum Error {
    /// Input table does not have the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A `(country code, year)` key occurs more than once within one table
    #[error("Malformed input: duplicate key ({code}, {year}) in {table}")]
    DuplicateKey {
        table: String,
        code: CountryCode,
        year: Year,
    },

    /// Too few paired observations for the requested statistic
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// All observations of a variable are equal, so no association is defined
    #[error("Insufficient data: {variable} has zero variance")]
    DegenerateVariance { variable: &'static str },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed-input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Create an error for a repeated `(code, year)` key
    pub fn duplicate_key(table: &str, code: &CountryCode, year: Year) -> Self {
        Self::DuplicateKey {
            table: table.to_string(),
            code: code.clone(),
            year,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidParameter(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Fatal input problems: the load must be abandoned
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_) | Self::DuplicateKey { .. })
    }

    /// Recoverable shortage of data: callers show a "no data" state instead
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::DegenerateVariance { .. }
        )
    }
}
