//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::new(state.db.clone())
}

/// Create products router
pub fn router(state: &AppState) -> Router {
    let service =
        ProductService::new(repository(state)).with_request_timeout(state.config.request_timeout);

    handlers::router(service)
}
