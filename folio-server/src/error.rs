//! API error contract.
//!
//! Every failure maps to a JSON envelope
//! `{"error": {"code", "message", "details"}}`. Validation details carry
//! the external-keyed violations map; other codes carry null details.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use folio_model::{AdminError, Violations};
use folio_storage::StorageError;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure modes exposed by the HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more field or cross-field violations.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// Write conflicts with existing state (slug collisions).
    #[error("{0}")]
    Conflict(String),

    /// Requested resource does not exist. The body stays generic.
    #[error("not found")]
    NotFound,

    /// Missing or wrong admin credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Anything the client cannot fix. Logged in full, reported
    /// generically.
    #[error("internal error: {0}")]
    Server(String),
}

impl ApiError {
    /// Single-field validation failure.
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        let mut v = Violations::new();
        v.add(field, message);
        ApiError::Validation(v)
    }
}

impl From<Violations> for ApiError {
    fn from(v: Violations) -> Self {
        ApiError::Validation(v)
    }
}

impl From<AdminError> for ApiError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::Validation(v) => ApiError::Validation(v),
            AdminError::SlugConflict(_) => ApiError::Conflict(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        if e.is_unique_violation() {
            return ApiError::Conflict("slug already exists, choose a different one".to_string());
        }
        match e {
            StorageError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Server(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::Validation(v) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
                v.to_external_value(),
            ),
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, "CONFLICT", message, Value::Null)
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
                Value::Null,
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
                Value::Null,
            ),
            ApiError::Server(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERVER_ERROR",
                    "Internal server error".to_string(),
                    Value::Null,
                )
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
                "details": details,
            }
        });
        (status, Json(body)).into_response()
    }
}
