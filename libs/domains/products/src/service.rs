//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles presence checks, casting and validation, the
/// duplicate-name rule, and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products, optionally narrowed by keyword and/or category
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter.normalized()).await
    }

    /// Products whose name or description contains `keyword`, ignoring case
    #[instrument(skip(self))]
    pub async fn search_products(&self, keyword: &str) -> ProductResult<Vec<Product>> {
        self.list_products(ProductFilter::keyword(keyword)).await
    }

    /// Products in exactly this category
    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.list_products(ProductFilter::category(category)).await
    }

    /// Products with quantity strictly below `threshold`
    #[instrument(skip(self))]
    pub async fn get_low_stock(&self, threshold: i64) -> ProductResult<Vec<Product>> {
        self.repository.list_low_stock(threshold).await
    }

    /// Get a product by ID. An id that is not a valid identifier is simply not found.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .get_by_id(uuid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Create a new product
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(ProductError::MissingFields(missing));
        }

        let fields = input.into_fields().map_err(ProductError::Validation)?;

        if self.repository.exists_by_name(&fields.name).await? {
            return Err(ProductError::DuplicateName(fields.name));
        }

        self.repository.create(fields).await
    }

    /// Update an existing product; omitted fields keep their stored values
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let existing = self.get_product(id).await?;

        let fields = input
            .merge_into(&existing)
            .map_err(ProductError::Validation)?;

        // Check for duplicate name if being changed
        if fields.name != existing.name && self.repository.exists_by_name(&fields.name).await? {
            return Err(ProductError::DuplicateName(fields.name));
        }

        self.repository
            .update(existing.id, fields)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let uuid = parse_id(id)?;
        if !self.repository.delete(uuid).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn parse_id(id: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}
