//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`              - Short link redirect (public)
//! - `GET  /health`              - Health check: cache, click queue (public)
//! - `POST /api/v1/links`        - Link creation (optional auth: anonymous allowed)
//! - `/api/v1/auth/*`            - Credential endpoints (strict rate limit)
//! - `/api/v1/*`                 - Owner-scoped endpoints (bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token; optional variant on link creation
//! - **Path normalization** - Trailing slash handling

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{create_link_handler, health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let auth_router = api::routes::auth_routes().layer(rate_limit::secure_layer());

    let protected_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let create_link_router = Router::new()
        .route("/links", post(create_link_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_layer,
        ))
        .layer(rate_limit::layer());

    let api_router = Router::new()
        .nest("/auth", auth_router)
        .merge(create_link_router)
        .merge(protected_router);

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
