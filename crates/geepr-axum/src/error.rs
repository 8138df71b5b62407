//! Axum-specific error types and mappings.
//!
//! Maps `RepositoryError` and request validation failures to HTTP status
//! codes and JSON response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geepr_core::RepositoryError;
use serde::Serialize;
use thiserror::Error;

/// Message returned for every failure the client cannot act on.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input or duplicate data).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error. The message is sent to the client as-is.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::DuplicateKey(msg) => Self::BadRequest(msg),
            RepositoryError::InvalidPagination(msg) => {
                tracing::error!("List query without ordering: {msg}");
                Self::Internal(INTERNAL_MESSAGE.to_string())
            }
            RepositoryError::Unclassified(source) => {
                tracing::error!("Storage failure: {source}");
                Self::Internal(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_status() {
        let status = |err: RepositoryError| HttpError::from(err).into_response().status();

        assert_eq!(
            status(RepositoryError::NotFound("game".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(RepositoryError::DuplicateKey("platform".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(RepositoryError::InvalidPagination("games".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(RepositoryError::unclassified("disk I/O error")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unclassified_detail_is_not_exposed() {
        let err = HttpError::from(RepositoryError::unclassified("near \"selec\": syntax error"));
        assert!(matches!(err, HttpError::Internal(ref msg) if msg == INTERNAL_MESSAGE));
    }
}
