//! Products Domain
//!
//! Admin product creation plus the public listing and name search, backed by
//! a MongoDB `products` collection.
//!
//! ```rust,ignore
//! use domain_products::{MongoProductRepository, ProductService, handlers};
//!
//! let repository = MongoProductRepository::new(db);
//! repository.init_indexes().await?;
//! let router = handlers::router(ProductService::new(repository));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, MAX_PRICE, Product, SearchQuery};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
