use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::validation::{Field, FieldViolation, combined_message};

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("All fields are required (missing: {})", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("{}", combined_message(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ProductError {
    /// Maps a write failure, turning a unique-index hit on `name` into [`ProductError::DuplicateName`].
    pub fn from_write(err: mongodb::error::Error, name: &str) -> Self {
        if is_duplicate_key(&err) {
            ProductError::DuplicateName(name.to_string())
        } else {
            err.into()
        }
    }
}

/// True when the driver reports a duplicate key (code 11000).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::MissingFields(ref fields) => AppError::MissingFields {
                message: err.to_string(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
            ProductError::Validation(violations) => AppError::Validation {
                message: combined_message(&violations),
                details: serde_json::to_value(&violations).ok(),
            },
            ProductError::DuplicateName(name) => {
                AppError::Conflict(format!("Product with name '{}' already exists", name))
            }
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Internal(err.to_string())
    }
}
