use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> ProductResult<()>;

    /// Every stored product
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `fragment` literally (case-sensitive)
    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> ProductResult<()> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        // v7 ids sort by creation time
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.product_name.contains(fragment))
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(name: &str) -> Product {
        Product::new(CreateProduct {
            product_name: name.into(),
            price: 100,
            rating: 4,
            image: format!("{name}.png"),
        })
    }

    #[tokio::test]
    async fn test_find_all_returns_every_product() {
        let repo = InMemoryProductRepository::new();
        repo.insert(&product("Alienware x15")).await.unwrap();
        repo.insert(&product("iPhone 13")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_sensitive_substring() {
        let repo = InMemoryProductRepository::new();
        repo.insert(&product("Alienware x15")).await.unwrap();
        repo.insert(&product("iPhone 13")).await.unwrap();

        let found = repo.search_by_name("ware").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_name, "Alienware x15");

        assert!(repo.search_by_name("alien").await.unwrap().is_empty());
    }
}
