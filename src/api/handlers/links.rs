//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListResponse, LinkResponse, ListLinksQuery, Pagination,
    UpdateLinkRequest,
};
use crate::api::middleware::auth::MaybeAuthUser;
use crate::api::response::{ok, ok_message};
use crate::application::services::AuthUser;
use crate::domain::entities::{LinkOwner, LinkPatch};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// Authentication is optional here: a valid bearer token makes the caller
/// the owner, anything else creates an anonymous (unclaimable) link.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(MaybeAuthUser(auth_user)): Extension<MaybeAuthUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let owner = match auth_user {
        Some(user) => LinkOwner::User(user.user_id),
        None => LinkOwner::Anonymous,
    };

    let link = state
        .link_service
        .create_link(owner, payload.original_url)
        .await?;

    Ok((
        StatusCode::CREATED,
        ok(
            "Short link created successfully",
            LinkResponse::from_link(link, &state.base_url),
        ),
    ))
}

/// Lists the caller's links with pagination, search, and status filter.
///
/// # Endpoint
///
/// `GET /api/v1/links?page&limit&search&status`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListLinksQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter();
    let page = filter.page;
    let limit = filter.page_size;

    let (links, total) = state
        .link_service
        .list_links(auth_user.user_id, filter)
        .await?;

    let links = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();

    Ok(ok(
        "Links retrieved successfully",
        LinkListResponse {
            links,
            pagination: Pagination::new(page, limit, total),
        },
    ))
}

/// Retrieves one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/v1/links/{code}`
///
/// # Errors
///
/// 404 if the code does not exist, 403 if the caller is not the owner.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.get_link(&code, auth_user.user_id).await?;

    Ok(ok(
        "Link retrieved successfully",
        LinkResponse::from_link(link, &state.base_url),
    ))
}

/// Partially updates one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/v1/links/{code}`
///
/// Only the provided fields change; the cache entry for the code is
/// invalidated once the write commits.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let patch = LinkPatch {
        original_url: payload.original_url,
        is_active: payload.is_active,
    };

    let link = state
        .link_service
        .update_link(&code, auth_user.user_id, patch)
        .await?;

    Ok(ok(
        "Link updated successfully",
        LinkResponse::from_link(link, &state.base_url),
    ))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/v1/links/{code}`
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    state
        .link_service
        .delete_link(&code, auth_user.user_id)
        .await?;

    Ok(ok_message("Link deleted successfully"))
}
