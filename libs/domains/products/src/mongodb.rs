//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{
        Binary, Bson, Document, doc,
        spec::BinarySubtype,
        to_bson,
    },
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFields, ProductFilter};
use crate::repository::ProductRepository;

/// Default collection name
pub const COLLECTION_NAME: &str = "products";

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes. The unique name index is what rejects duplicate names.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_name_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            // Low-stock queries
            IndexModel::builder()
                .keys(doc! { "quantity": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_quantity".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// `_id` filter in the form `insert_one` stores a [`Uuid`]: generic binary.
    fn id_filter(id: Uuid) -> Document {
        doc! {
            "_id": Bson::Binary(Binary {
                subtype: BinarySubtype::Generic,
                bytes: id.as_bytes().to_vec(),
            })
        }
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref keyword) = filter.keyword {
            // Literal substring match; user input never reaches the regex engine unescaped
            let pattern = regex::escape(keyword);
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                ],
            );
        }

        if let Some(ref category) = filter.category {
            doc.insert("category", category.as_str());
        }

        doc
    }

    async fn find_all(&self, filter: Document) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(filter).sort(doc! { "_id": 1 }).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, fields), fields(product_name = %fields.name))]
    async fn create(&self, fields: ProductFields) -> ProductResult<Product> {
        let product = Product::new(fields);

        self.collection
            .insert_one(&product)
            .await
            .map_err(|e| ProductError::from_write(e, &product.name))?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.find_all(Self::build_filter(&filter)).await
    }

    #[instrument(skip(self))]
    async fn list_low_stock(&self, threshold: i64) -> ProductResult<Vec<Product>> {
        self.find_all(doc! { "quantity": { "$lt": threshold } })
            .await
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: Uuid, fields: ProductFields) -> ProductResult<Option<Product>> {
        let now = to_bson(&chrono::Utc::now())?;
        let update = doc! {
            "$set": {
                "name": fields.name.as_str(),
                "description": fields.description.as_str(),
                "price": fields.price,
                "quantity": fields.quantity,
                "category": fields.category.as_str(),
                "supplier": fields.supplier.as_str(),
                "updatedAt": now,
            }
        };

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| ProductError::from_write(e, &fields.name))?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let filter = doc! { "name": name };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }
}
