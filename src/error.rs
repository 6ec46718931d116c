//! Error type shared by the store, config and record-editing layers
//!
//! The projection engine itself never errors; degenerate loan inputs resolve
//! to a fallback estimate or an empty result instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FywiseError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown finance field: {0}")]
    UnknownField(String),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl FywiseError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FywiseError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FywiseError>;
