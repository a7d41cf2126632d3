use serde::{Deserialize, Serialize};

use crate::models::{RepositoryError, StoreErrorDetail};

/// `{ "error": ... }` payload for input problems and empty searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// `{ "err": ... }` payload for failures reported by the record store.
#[derive(Debug, Serialize, PartialEq)]
pub struct StoreErrorResponse {
    pub err: StoreErrorDetail,
}

impl From<&RepositoryError> for StoreErrorResponse {
    fn from(error: &RepositoryError) -> Self {
        Self {
            err: StoreErrorDetail::from(error),
        }
    }
}

/// `{ "name": ... }` payload of the last-added name endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameResponse {
    pub name: String,
}

/// Query string carrying an optional `name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}
