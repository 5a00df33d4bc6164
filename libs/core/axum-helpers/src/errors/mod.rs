pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: Integer error code for logging/monitoring (e.g., 1008)
/// - `error`: Machine-readable error identifier (e.g., "CONFLICT")
/// - `message`: Human-readable error message
/// - `details`: Optional additional error details (e.g., per-field validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Product with name 'Pen' already exists",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Required request fields are absent or blank
    #[error("Missing fields: {message}")]
    MissingFields {
        message: String,
        fields: Vec<String>,
    },

    /// One or more fields violate their constraints
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Data store failure; the driver message is passed to the client
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// HTTP status and error code this error maps to.
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::JsonExtractorRejection(e) => (e.status(), ErrorCode::JsonExtraction),
            AppError::MissingFields { .. } => (StatusCode::BAD_REQUEST, ErrorCode::MissingFields),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {:?}", e);
                (e.body_text(), None)
            }
            AppError::MissingFields { message, fields } => {
                tracing::info!(error_code = code.code(), ?fields, "Missing fields: {}", message);
                (message, Some(serde_json::json!({ "fields": fields })))
            }
            AppError::Validation { message, details } => {
                tracing::info!(error_code = code.code(), "Validation error: {}", message);
                (message, details)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = code.code(), "Conflict: {}", msg);
                (msg, None)
            }
            AppError::Database(msg) => {
                tracing::error!(error_code = code.code(), "Database error: {}", msg);
                (msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (msg, None)
            }
        };

        let body = ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Builds a bare error response from a status and code.
pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    error_code: ErrorCode,
) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}
