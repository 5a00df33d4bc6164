use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductFields, ProductFilter};

/// Repository trait for Product persistence
///
/// Inputs arrive already trimmed and validated; implementations only store and query.
/// Name uniqueness must still be enforced by the backend, surfacing as
/// [`ProductError::DuplicateName`](crate::ProductError::DuplicateName).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product with a fresh id and timestamps
    async fn create(&self, fields: ProductFields) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products matching the filter; `None` criteria match everything
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Products whose quantity is strictly below `threshold`
    async fn list_low_stock(&self, threshold: i64) -> ProductResult<Vec<Product>>;

    /// Replace the business fields; `None` if the product no longer exists
    async fn update(&self, id: Uuid, fields: ProductFields) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, returning whether one was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Check if a product name exists
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;
}
