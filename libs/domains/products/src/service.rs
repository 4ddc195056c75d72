//! Product Service - catalog writes and reads

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    request_timeout: Duration,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            request_timeout: self.request_timeout,
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound every repository call by `timeout`
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn add_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = Product::new(input);
        self.within(self.repository.insert(&product))
            .await
            .map_err(|e| match e {
                ProductError::Timeout => ProductError::Timeout,
                other => ProductError::NotCreated(other.to_string()),
            })?;

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.within(self.repository.find_all()).await
    }

    /// Products whose name contains `name`; blank or missing input is rejected
    #[instrument(skip(self))]
    pub async fn search_products(&self, name: Option<&str>) -> ProductResult<Vec<Product>> {
        let fragment = name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ProductError::EmptyQuery)?;

        self.within(self.repository.search_by_name(fragment)).await
    }

    async fn within<T>(
        &self,
        operation: impl Future<Output = ProductResult<T>>,
    ) -> ProductResult<T> {
        tokio::time::timeout(self.request_timeout, operation)
            .await
            .map_err(|_| ProductError::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn create_input() -> CreateProduct {
        CreateProduct {
            product_name: "Alienware x15".into(),
            price: 2500,
            rating: 5,
            image: "alienware.png".into(),
        }
    }

    #[tokio::test]
    async fn test_add_product_inserts() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|p| p.product_name == "Alienware x15" && p.price == 2500)
            .times(1)
            .returning(|_| Ok(()));

        let product = ProductService::new(repo)
            .add_product(create_input())
            .await
            .unwrap();
        assert_eq!(product.rating, 5);
    }

    #[tokio::test]
    async fn test_add_product_rejects_empty_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().never();

        let result = ProductService::new(repo)
            .add_product(CreateProduct {
                product_name: String::new(),
                ..create_input()
            })
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_product_insert_failure() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .returning(|_| Err(ProductError::Database("connection reset".into())));

        let result = ProductService::new(repo).add_product(create_input()).await;
        assert!(matches!(result, Err(ProductError::NotCreated(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let mut repo = MockProductRepository::new();
        repo.expect_search_by_name().never();
        let service = ProductService::new(repo);

        assert!(matches!(
            service.search_products(None).await,
            Err(ProductError::EmptyQuery)
        ));
        assert!(matches!(
            service.search_products(Some("   ")).await,
            Err(ProductError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_search_passes_fragment_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_search_by_name()
            .withf(|fragment| fragment.to_string() == "ware")
            .times(1)
            .returning(|_| Ok(vec![]));

        let found = ProductService::new(repo)
            .search_products(Some("ware"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_list_propagates_database_errors() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all()
            .returning(|| Err(ProductError::Database("no reachable servers".into())));

        let result = ProductService::new(repo).list_products().await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }

    struct StalledRepository;

    #[async_trait::async_trait]
    impl ProductRepository for StalledRepository {
        async fn insert(&self, _: &Product) -> ProductResult<()> {
            std::future::pending().await
        }
        async fn find_all(&self) -> ProductResult<Vec<Product>> {
            std::future::pending().await
        }
        async fn search_by_name(&self, _: &str) -> ProductResult<Vec<Product>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_store_times_out() {
        let service =
            ProductService::new(StalledRepository).with_request_timeout(Duration::from_millis(20));

        // Insert timeouts stay timeouts rather than becoming NotCreated
        assert!(matches!(
            service.add_product(create_input()).await,
            Err(ProductError::Timeout)
        ));
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Timeout)
        ));
        assert!(matches!(
            service.search_products(Some("ware")).await,
            Err(ProductError::Timeout)
        ));
    }
}
