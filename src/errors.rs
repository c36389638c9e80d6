use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the engine, services and storage layers.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Installment group inconsistent: {0}")]
    GroupConsistency(String),
    #[error("Not found: {0}")]
    NotFound(Uuid),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::StorageUnavailable(err.to_string())
    }
}
