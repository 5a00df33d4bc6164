//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "DATABASE_ERROR",
        "message": "Server selection timeout: No available servers"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Price cannot be negative, Quantity cannot be negative",
        "details": [
            { "field": "price", "message": "Price cannot be negative" },
            { "field": "quantity", "message": "Quantity cannot be negative" }
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Required fields missing",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "MISSING_FIELDS",
        "message": "All fields are required (missing: price, supplier)",
        "details": { "fields": ["price", "supplier"] }
    })
)]
pub struct BadRequestMissingFieldsResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Request body is not valid JSON",
    content_type = "application/json",
    example = json!({
        "code": 1003,
        "error": "JSON_EXTRACTION",
        "message": "Failed to parse the request body as JSON: key must be a string at line 1 column 2"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Product not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 1008,
        "error": "CONFLICT",
        "message": "Product with name 'Pen' already exists"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
