use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy for the whole service. Handlers return this directly;
/// the `ResponseError` impl below is the single place where a failure is
/// turned into an HTTP response.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity with id={0} not found")]
    EntityNotFound(i32),
    /// Request body failed deserialization/validation. Carries the
    /// deserializer's message verbatim. Mapped to 403, not 400, to keep
    /// the original service contract.
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Uniform error envelope: `{"status": <int>, "message": <string>}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::FORBIDDEN,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ApiError {
            status: status.as_u16(),
            message: self.to_string(),
        })
    }
}
