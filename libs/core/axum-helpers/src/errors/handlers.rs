use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for unmatched routes; answers with a JSON [`super::ErrorResponse`].
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
        ErrorCode::NotFound,
    )
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message(),
        ErrorCode::MethodNotAllowed,
    )
}
