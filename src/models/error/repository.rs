use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl RepositoryError {
    /// Short kind label used in `{ "err": ... }` payloads and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound(_) => "NotFound",
            RepositoryError::ConnectionError(_) => "ConnectionError",
            RepositoryError::ConstraintViolation(_) => "ConstraintViolation",
            RepositoryError::InvalidData(_) => "ValidationError",
            RepositoryError::Unknown(_) => "UnknownError",
        }
    }
}

/// Serialized shape of a store failure as reported to HTTP callers.
#[derive(Debug, Serialize, PartialEq)]
pub struct StoreErrorDetail {
    pub name: String,
    pub message: String,
}

impl From<&RepositoryError> for StoreErrorDetail {
    fn from(error: &RepositoryError) -> Self {
        Self {
            name: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}
