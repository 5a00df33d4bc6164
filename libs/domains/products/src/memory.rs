//! In-memory implementation of ProductRepository, used by tests and local runs
//! without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFields, ProductFilter};
use crate::repository::ProductRepository;

/// Products kept in insertion order behind an async lock.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        let keyword_ok = filter.keyword.as_deref().is_none_or(|keyword| {
            let keyword = keyword.to_lowercase();
            product.name.to_lowercase().contains(&keyword)
                || product.description.to_lowercase().contains(&keyword)
        });
        let category_ok = filter
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        keyword_ok && category_ok
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, fields: ProductFields) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.name == fields.name) {
            return Err(ProductError::DuplicateName(fields.name));
        }

        let product = Product::new(fields);
        products.push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| Self::matches(p, &filter))
            .cloned()
            .collect())
    }

    async fn list_low_stock(&self, threshold: i64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.quantity < threshold)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, fields: ProductFields) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id != id && p.name == fields.name) {
            return Err(ProductError::DuplicateName(fields.name));
        }

        Ok(products.iter_mut().find(|p| p.id == id).map(|product| {
            product.apply(fields);
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.iter().any(|p| p.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, quantity: i64, category: &str) -> ProductFields {
        ProductFields {
            name: name.into(),
            description: format!("{name} description"),
            price: 10.0,
            quantity,
            category: category.into(),
            supplier: "Acme".into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = InMemoryProductRepository::new();
        repo.create(fields("Pen", 5, "Office")).await.unwrap();

        let err = repo.create(fields("Pen", 1, "Other")).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateName(name) if name == "Pen"));
    }

    #[tokio::test]
    async fn test_list_filters_by_keyword_case_insensitively() {
        let repo = InMemoryProductRepository::new();
        repo.create(fields("Blue Pen", 5, "Office")).await.unwrap();
        repo.create(fields("Stapler", 5, "Office")).await.unwrap();

        let found = repo.list(ProductFilter::keyword("PEN")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Blue Pen");
    }

    #[tokio::test]
    async fn test_low_stock_is_strictly_below() {
        let repo = InMemoryProductRepository::new();
        repo.create(fields("A", 3, "X")).await.unwrap();
        repo.create(fields("B", 10, "X")).await.unwrap();

        let low = repo.list_low_stock(10).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "A");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repo = InMemoryProductRepository::new();
        let result = repo
            .update(Uuid::now_v7(), fields("A", 1, "X"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_may_keep_own_name() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(fields("A", 1, "X")).await.unwrap();

        let updated = repo
            .update(created.id, fields("A", 7, "X"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(fields("A", 1, "X")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
