//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::server::HealthCheckFuture;
use axum_helpers::run_health_checks;
use serde_json::Value;

use crate::state::AppState;

/// `GET /ready`; liveness (`/health`) comes from `axum_helpers::health_router`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings MongoDB
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(database::mongodb::check_health(&state.mongo_client)),
    )];

    run_health_checks(checks).await
}
