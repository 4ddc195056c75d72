//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// MongoDB-backed product catalog over the `products` collection
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
        }
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Index `product_name` for the search endpoint
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let by_name = IndexModel::builder()
            .keys(doc! { "product_name": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_name_idx".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(by_name).await?;

        tracing::info!("Product indexes ensured");
        Ok(())
    }
}

/// Anchorless regex matching `fragment` literally
fn literal_pattern(fragment: &str) -> String {
    regex::escape(fragment)
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.product_name))]
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        self.collection.insert_one(product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let filter = doc! {
            "product_name": { "$regex": literal_pattern(fragment) }
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        tracing::debug!(count = products.len(), "Product search finished");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use uuid::Uuid;

    #[test]
    fn test_literal_pattern_escapes_metacharacters() {
        assert_eq!(literal_pattern("x15"), "x15");
        assert_eq!(literal_pattern("a.b*"), r"a\.b\*");
        assert_eq!(literal_pattern("(.*)"), r"\(\.\*\)");
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_insert_and_search() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let repo = MongoProductRepository::with_collection(
            client.database("shop_api_test"),
            &format!("products_{}", Uuid::now_v7()),
        );
        repo.init_indexes().await.unwrap();

        for name in ["Alienware x15", "iPhone 13", "a.b"] {
            repo.insert(&Product::new(CreateProduct {
                product_name: name.into(),
                price: 100,
                rating: 4,
                image: "img.png".into(),
            }))
            .await
            .unwrap();
        }

        assert_eq!(repo.find_all().await.unwrap().len(), 3);
        assert_eq!(repo.search_by_name("ware").await.unwrap().len(), 1);
        assert!(repo.search_by_name("alien").await.unwrap().is_empty());
        // "." must not act as a wildcard
        assert_eq!(repo.search_by_name("a.b").await.unwrap().len(), 1);

        repo.collection.drop().await.unwrap();
    }
}
