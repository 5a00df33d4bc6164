use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Business fields of a product, declared in reporting order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Name,
    Description,
    Price,
    Quantity,
    Category,
    Supplier,
}

impl Field {
    fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Product name is required",
            Field::Description => "Product description is required",
            Field::Price => "Price is required",
            Field::Quantity => "Quantity is required",
            Field::Category => "Category is required",
            Field::Supplier => "Supplier is required",
        }
    }
}

/// One rejected field and the human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: Field,
    #[schema(example = "Price cannot be negative")]
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, field.required_message())
    }
}

/// Flattens `validator` output into violations.
pub fn violations_from(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for (name, errs) in errors.field_errors() {
        let Ok(field) = Field::from_str(&name) else {
            continue;
        };
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            violations.push(FieldViolation::new(field, message));
        }
    }
    violations
}

/// Orders violations by field so messages are deterministic.
pub fn sorted(mut violations: Vec<FieldViolation>) -> Vec<FieldViolation> {
    violations.sort_by_key(|v| v.field);
    violations
}

/// The messages joined with `", "`, as sent to clients.
pub fn combined_message(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 0, message = "Quantity cannot be negative"))]
        quantity: i64,
        #[validate(length(min = 1, message = "Product name is required"))]
        name: String,
    }

    #[test]
    fn test_field_string_forms() {
        assert_eq!(Field::Quantity.to_string(), "quantity");
        assert_eq!(Field::from_str("supplier").unwrap(), Field::Supplier);
        assert_eq!(serde_json::to_value(Field::Price).unwrap(), "price");
    }

    #[test]
    fn test_required_messages() {
        assert_eq!(
            FieldViolation::required(Field::Name).message,
            "Product name is required"
        );
        assert_eq!(
            FieldViolation::required(Field::Supplier).message,
            "Supplier is required"
        );
    }

    #[test]
    fn test_violations_from_validator_sorted_by_field() {
        let errors = Sample {
            quantity: -1,
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let violations = sorted(violations_from(&errors));
        assert_eq!(
            combined_message(&violations),
            "Product name is required, Quantity cannot be negative"
        );
    }

    #[test]
    fn test_combined_message_single() {
        let violations = vec![FieldViolation::new(Field::Price, "Price cannot be negative")];
        assert_eq!(combined_message(&violations), "Price cannot be negative");
    }
}
