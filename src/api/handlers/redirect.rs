//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (cache-aside; cache hit skips the database)
/// 2. Reject inactive links with 410, distinct from 404
/// 3. Enqueue a click event for the background worker (`try_send`; if the
///    queue is full the click is dropped, the redirect is not delayed)
/// 4. Return 307 Temporary Redirect immediately
///
/// The click-count increment and the analytics insert both happen in the
/// worker; their ordering relative to this response is unspecified.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    if !link.is_active {
        return Err(AppError::gone("Short link inactive"));
    }

    let click_event = ClickEvent::new(
        link.id,
        code,
        link.owner,
        Some(client_ip(&headers, &addr)),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_sender.try_send(click_event).is_err() {
        tracing::warn!("click queue full, dropping click event");
    }

    Ok(Redirect::temporary(&link.original_url))
}
