//! DTOs for the link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{LinkListFilter, ShortLink};

/// Request body for `POST /api/v1/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// Request body for `PUT /api/v1/links/{code}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/links`.
#[derive(Debug, Deserialize, Default)]
pub struct ListLinksQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    /// `active` or `inactive`; anything else means no filter.
    pub status: Option<String>,
}

impl ListLinksQuery {
    const DEFAULT_PAGE_SIZE: i64 = 10;
    const MAX_PAGE_SIZE: i64 = 100;

    pub fn into_filter(self) -> LinkListFilter {
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        let page_size = self
            .limit
            .filter(|l| *l > 0 && *l <= Self::MAX_PAGE_SIZE)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE);

        let is_active = match self.status.as_deref() {
            Some("active") => Some(true),
            Some("inactive") => Some(false),
            _ => None,
        };

        LinkListFilter {
            page,
            page_size,
            search: self.search.filter(|s| !s.is_empty()),
            is_active,
        }
    }
}

/// Public projection of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub is_active: bool,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        let short_url = format!("{}{}", base_url, link.short_code);
        Self {
            id: link.id,
            user_id: link.owner.as_id(),
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            is_active: link.is_active,
            click_count: link.click_count,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Payload for `GET /api/v1/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
    pub pagination: Pagination,
}
