//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};

use crate::handler::response::HealthResponse;
use crate::service::ServiceState;

/// Reports that the process is up. The document store is not consulted.
async fn health_status() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
