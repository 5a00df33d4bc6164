use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, Field, FieldViolation};

/// Threshold used by the low-stock view when the caller gives none.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Units on hand
    pub quantity: i64,
    pub category: String,
    pub supplier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// New record with a fresh v7 id and both timestamps set to now.
    pub fn new(fields: ProductFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            category: fields.category,
            supplier: fields.supplier,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the business fields and bumps `updated_at`.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.quantity = fields.quantity;
        self.category = fields.category;
        self.supplier = fields.supplier;
        self.updated_at = Utc::now();
    }
}

/// A numeric body field: a JSON number or a numeric string as sent by HTML forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }

    /// The finite value this input denotes, if any.
    fn to_finite(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    fn to_price(&self) -> Result<f64, FieldViolation> {
        if self.is_blank() {
            return Err(FieldViolation::required(Field::Price));
        }
        self.to_finite()
            .ok_or_else(|| FieldViolation::new(Field::Price, "Price must be a number"))
    }

    fn to_quantity(&self) -> Result<i64, FieldViolation> {
        if self.is_blank() {
            return Err(FieldViolation::required(Field::Quantity));
        }
        match self.to_finite() {
            Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(n as i64),
            _ => Err(FieldViolation::new(
                Field::Quantity,
                "Quantity must be a whole number",
            )),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Request body for creating a product. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateProduct {
    #[schema(example = "Pen")]
    pub name: Option<String>,
    #[schema(example = "Blue ink")]
    pub description: Option<String>,
    #[schema(value_type = f64, example = 1000)]
    pub price: Option<NumericInput>,
    #[schema(value_type = i64, example = 50)]
    pub quantity: Option<NumericInput>,
    #[schema(example = "Office")]
    pub category: Option<String>,
    #[schema(example = "Acme")]
    pub supplier: Option<String>,
}

impl CreateProduct {
    /// Fields that are absent or blank, in canonical order.
    pub fn missing_fields(&self) -> Vec<Field> {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().is_none_or(|s| s.trim().is_empty())
        }
        fn blank_number(n: &Option<NumericInput>) -> bool {
            n.as_ref().is_none_or(NumericInput::is_blank)
        }

        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push(Field::Name);
        }
        if blank(&self.description) {
            missing.push(Field::Description);
        }
        if blank_number(&self.price) {
            missing.push(Field::Price);
        }
        if blank_number(&self.quantity) {
            missing.push(Field::Quantity);
        }
        if blank(&self.category) {
            missing.push(Field::Category);
        }
        if blank(&self.supplier) {
            missing.push(Field::Supplier);
        }
        missing
    }

    /// Trims, casts and validates into storable fields.
    ///
    /// Every violation is collected, not just the first one.
    pub fn into_fields(self) -> Result<ProductFields, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let price = match self.price.as_ref().map(NumericInput::to_price) {
            Some(Ok(price)) => price,
            Some(Err(v)) => {
                violations.push(v);
                0.0
            }
            None => {
                violations.push(FieldViolation::required(Field::Price));
                0.0
            }
        };

        let quantity = match self.quantity.as_ref().map(NumericInput::to_quantity) {
            Some(Ok(quantity)) => quantity,
            Some(Err(v)) => {
                violations.push(v);
                0
            }
            None => {
                violations.push(FieldViolation::required(Field::Quantity));
                0
            }
        };

        let fields = ProductFields {
            name: trimmed(self.name),
            description: trimmed(self.description),
            price,
            quantity,
            category: trimmed(self.category),
            supplier: trimmed(self.supplier),
        };

        if let Err(errors) = fields.validate() {
            violations.extend(validation::violations_from(&errors));
        }

        if violations.is_empty() {
            Ok(fields)
        } else {
            Err(validation::sorted(violations))
        }
    }
}

/// Request body for updating a product. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<NumericInput>,
    #[schema(value_type = Option<i64>)]
    pub quantity: Option<NumericInput>,
    pub category: Option<String>,
    pub supplier: Option<String>,
}

impl UpdateProduct {
    /// Merges the supplied fields over `existing` and validates the result.
    pub fn merge_into(self, existing: &Product) -> Result<ProductFields, Vec<FieldViolation>> {
        CreateProduct {
            name: self.name.or_else(|| Some(existing.name.clone())),
            description: self
                .description
                .or_else(|| Some(existing.description.clone())),
            price: self.price.or_else(|| Some(existing.price.into())),
            quantity: self.quantity.or_else(|| Some(existing.quantity.into())),
            category: self.category.or_else(|| Some(existing.category.clone())),
            supplier: self.supplier.or_else(|| Some(existing.supplier.clone())),
        }
        .into_fields()
    }
}

/// The six business fields after trimming, casting and validation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductFields {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Product description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name and description
    pub keyword: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            category: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            keyword: None,
            category: Some(category.into()),
        }
    }

    /// Drops empty criteria so `?keyword=` lists everything. Other values,
    /// whitespace included, are matched as given.
    pub fn normalized(self) -> Self {
        fn non_empty(s: Option<String>) -> Option<String> {
            s.filter(|s| !s.is_empty())
        }
        Self {
            keyword: non_empty(self.keyword),
            category: non_empty(self.category),
        }
    }
}

/// Keyword search parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name and description
    pub keyword: Option<String>,
}

/// Low-stock query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockQuery {
    /// Products with quantity strictly below this are returned (default 10)
    #[param(value_type = Option<i64>)]
    pub threshold: Option<String>,
}

impl LowStockQuery {
    /// Leading integer of `threshold`, or [`DEFAULT_LOW_STOCK_THRESHOLD`].
    ///
    /// Lenient like a form parser: `"5"` and `"5.9"` give 5, `"12abc"` gives 12,
    /// and `"abc"` or an empty value fall back to the default.
    pub fn threshold(&self) -> i64 {
        self.threshold
            .as_deref()
            .and_then(leading_integer)
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

/// Out-of-range values saturate instead of falling back to the default.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let signed = if negative {
        format!("-{}", &digits[..end])
    } else {
        digits[..end].to_string()
    };
    Some(signed.parse::<i64>().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

/// Body returned by a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}
