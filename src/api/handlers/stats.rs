//! Handler for the dashboard statistics endpoint.

use axum::{Extension, extract::State, response::IntoResponse};

use crate::api::response::ok;
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's dashboard aggregates.
///
/// # Endpoint
///
/// `GET /api/v1/dashboard/stats`
///
/// Served cache-aside; the click worker invalidates these entries after
/// every recorded click, so totals lag a click by at most one insert.
pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let overview = state.stats_service.overview(auth_user.user_id).await?;

    Ok(ok("Statistics retrieved successfully", overview))
}
