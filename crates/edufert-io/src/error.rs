//! Error types for edufert-io

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] edufert_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a core malformed-input error
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Core(edufert_core::Error::malformed(message))
    }

    /// Fatal input problems, including CSV records the parser rejects
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::Core(err) => err.is_malformed_input(),
            Self::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }
}
