use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::{ErrorMessage, RepositoryError, StoreErrorResponse};

/// Errors surfaced by the HTTP controllers.
///
/// Store failures are answered with `200 OK` and an `err`
/// payload; only input validation changes the status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::OK,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorMessage::new(msg)),
            ApiError::Store(err) => HttpResponse::Ok().json(StoreErrorResponse::from(err)),
        }
    }
}
