//! API routes module
//!
//! Domain routers are merged at the root; `create_router` adds docs and middleware.

pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(products::router(state))
        .merge(health::router(state.clone()))
}

/// Ensure the unique and search indexes exist before serving
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::repository(state).init_indexes().await?;
    products::repository(state).init_indexes().await?;
    Ok(())
}
