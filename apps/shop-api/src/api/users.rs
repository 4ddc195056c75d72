//! Users API routes
//!
//! Wires the users domain to its MongoDB repository and token issuer.

use axum::Router;
use axum_helpers::TokenIssuer;
use domain_users::{MongoUserRepository, TokenService, UserService, handlers};
use std::sync::Arc;

use crate::state::AppState;

pub fn repository(state: &AppState) -> MongoUserRepository {
    MongoUserRepository::new(state.db.clone())
}

/// Create users router
pub fn router(state: &AppState) -> Router {
    let repository = Arc::new(repository(state));
    let tokens = TokenService::new(TokenIssuer::new(&state.config.jwt), Arc::clone(&repository));

    let service =
        UserService::new(repository, tokens).with_request_timeout(state.config.request_timeout);

    handlers::router(service)
}
