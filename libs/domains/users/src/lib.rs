//! Users Domain
//!
//! Signup and login over a MongoDB `users` collection.
//!
//! ```text
//! handlers ─► UserService ─┬─► password (argon2)
//!                          ├─► TokenService ─► TokenIssuer (HS256)
//!                          └─► UserRepository (MongoDB | in-memory)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_users::{MongoUserRepository, TokenService, UserService, handlers};
//!
//! let repository = Arc::new(MongoUserRepository::new(db));
//! repository.init_indexes().await?;
//! let tokens = TokenService::new(issuer, repository.clone());
//! let router = handlers::router(UserService::new(repository, tokens));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;
pub mod tokens;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    Address, CartItem, LoginRequest, NewUser, Order, Payment, SignupRequest, User, UserResponse,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use tokens::TokenService;
