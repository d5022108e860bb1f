use thiserror::Error;

use crate::domain::RecordKind;
use crate::forms::ValidationErrors;

/// Error type that captures record-keeping failures across the library.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("No {0} form is open")]
    FormClosed(RecordKind),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    /// True for failures raised before any store call was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
