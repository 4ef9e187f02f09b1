//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{application::services::AuthUser, error::AppError, state::AppState};

/// Identity attached by [`optional_layer`]: present on every request that
/// passed through it, holding `Some` only for a valid, active session.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

/// Authenticates requests using Bearer tokens from the Authorization
/// header.
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization: Bearer <token>`
/// 2. Verify signature and expiry
/// 3. Re-check that the referenced session is still active in the store
/// 4. Attach [`crate::application::services::AuthUser`] as a request
///    extension and continue
///
/// A structurally valid token whose session was revoked is rejected; the
/// session check always hits the store.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized("Authorization header required or invalid format")
        })?;

    let auth_user = state.auth_service.authorize(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Optional variant used where anonymous access is permitted.
///
/// A valid token attaches the caller's identity; an absent, malformed, or
/// revoked token simply leaves the request anonymous instead of rejecting
/// it.
pub async fn optional_layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let token = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);

    let mut req = Request::from_parts(parts, body);

    let mut identity = MaybeAuthUser(None);
    if let Some(token) = token {
        if let Ok(auth_user) = state.auth_service.authorize(&token).await {
            identity = MaybeAuthUser(Some(auth_user));
        }
    }
    req.extensions_mut().insert(identity);

    next.run(req).await
}
