//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use qrfolio_core::error::{AppError, ErrorKind};

/// Message returned for every infrastructure failure.
pub const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Status code and wire code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::ExternalService => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl From<AppError> for ApiErrorResponse {
    fn from(err: AppError) -> Self {
        let (_, code) = status_for(err.kind);
        let message = if err.kind.is_infrastructure() {
            INTERNAL_MESSAGE.to_string()
        } else {
            err.message
        };
        Self {
            error: code.to_string(),
            message,
        }
    }
}

/// Wrapper so handlers can return `AppError` directly.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, _) = status_for(err.kind);
        if err.kind.is_infrastructure() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Request failed");
        }
        (status, Json(ApiErrorResponse::from(err))).into_response()
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_message_hidden() {
        let body = ApiErrorResponse::from(AppError::database("connection refused at 10.0.0.3"));
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert_eq!(body.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_client_errors_keep_message() {
        let body = ApiErrorResponse::from(AppError::conflict("Cannot revoke a used phrase"));
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.message, "Cannot revoke a used phrase");
        assert_eq!(status_for(ErrorKind::Authorization).0, StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Validation).0, StatusCode::BAD_REQUEST);
    }
}
