//! API route groups.

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    dashboard_stats_handler, delete_link_handler, get_link_handler, list_links_handler,
    login_handler, logout_handler, refresh_handler, register_handler, update_link_handler,
};
use crate::state::AppState;

/// Credential endpoints. Public, but rate-limited more strictly than the
/// rest of the surface.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Open a session, returns access + refresh tokens
/// - `POST /refresh`  - Mint a new access token
/// - `POST /logout`   - Revoke the session
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler))
}

/// Owner-scoped endpoints, all behind bearer authentication.
///
/// # Endpoints
///
/// - `GET    /links`           - List own links (paginated, filterable)
/// - `GET    /links/{code}`    - Fetch one own link
/// - `PUT    /links/{code}`    - Patch URL and/or active flag
/// - `DELETE /links/{code}`    - Hard-delete a link
/// - `GET    /dashboard/stats` - Aggregate statistics
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler))
        .route(
            "/links/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/dashboard/stats", get(dashboard_stats_handler))
}
