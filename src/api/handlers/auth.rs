//! Handlers for registration, login, refresh, and logout.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::auth::{
    AccessTokenResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPairResponse,
    UserResponse,
};
use crate::api::response::{ok, ok_message};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Errors
///
/// Returns 409 Conflict if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .register(payload.full_name, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        ok("User registered successfully", UserResponse::from(user)),
    ))
}

/// Authenticates a user and opens a session.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// Returns an access/refresh token pair. Unknown email and wrong password
/// produce the identical 401 response.
pub async fn login_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ip_address = client_ip(&headers, &addr);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let pair = state
        .auth_service
        .login(&payload.email, &payload.password, ip_address, user_agent)
        .await?;

    Ok(ok(
        "Login successful",
        TokenPairResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        },
    ))
}

/// Mints a new access token from a refresh token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/refresh`
///
/// The refresh token is not rotated.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let access_token = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(ok(
        "Token refreshed successfully",
        AccessTokenResponse { access_token },
    ))
}

/// Revokes the session holding this refresh token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/logout`
///
/// Idempotent: logging out an already-invalid token still succeeds.
pub async fn logout_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state.auth_service.logout(&payload.refresh_token).await?;

    Ok(ok_message("Logout successful"))
}
