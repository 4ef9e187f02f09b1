//! Health check handler.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cache: &'static str,
    click_queue_capacity: usize,
}

/// Reports service liveness and cache reachability.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cache_healthy = state.cache.health_check().await;

    Json(HealthResponse {
        status: "ok",
        cache: if cache_healthy { "up" } else { "down" },
        click_queue_capacity: state.click_sender.capacity(),
    })
}
