//! Error taxonomy for dataset generation and persistence

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Rejected at configuration time, before any field is computed
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Voltage and field sequences reaching the assembler differ in length
    #[error("length mismatch: {voltages} voltage vectors but {fields} field vectors")]
    LengthMismatch { voltages: usize, fields: usize },

    /// Malformed dataset file or manifest
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter { name, reason: reason.into() }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse { line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
