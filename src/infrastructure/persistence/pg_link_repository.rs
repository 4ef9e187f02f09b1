//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{LinkListFilter, LinkPatch, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, user_id, short_code, original_url, is_active, click_count, \
                            last_clicked_at, created_at, updated_at, created_by, updated_by";

/// PostgreSQL repository for short link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    user_id: Option<i64>,
    short_code: String,
    original_url: String,
    is_active: bool,
    click_count: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<i64>,
    updated_by: Option<i64>,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink {
            id: row.id,
            owner: row.user_id.into(),
            short_code: row.short_code,
            original_url: row.original_url,
            is_active: row.is_active,
            click_count: row.click_count,
            last_clicked_at: row.last_clicked_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            updated_by: row.updated_by,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let owner_id = new_link.owner.as_id();

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "INSERT INTO short_links (user_id, short_code, original_url, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(owner_id)
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM short_links WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM short_links WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn list_by_owner(
        &self,
        user_id: i64,
        filter: LinkListFilter,
    ) -> Result<(Vec<ShortLink>, i64), AppError> {
        let page = filter.page.max(1);
        let page_size = filter.page_size.max(1);
        let offset = (page - 1) * page_size;

        let search_pattern = filter.search.as_ref().map(|s| format!("%{s}%"));

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM short_links WHERE user_id = ");
        count_query.push_bind(user_id);
        if let Some(pattern) = &search_pattern {
            count_query.push(" AND (short_code ILIKE ");
            count_query.push_bind(pattern);
            count_query.push(" OR original_url ILIKE ");
            count_query.push_bind(pattern);
            count_query.push(")");
        }
        if let Some(is_active) = filter.is_active {
            count_query.push(" AND is_active = ");
            count_query.push_bind(is_active);
        }

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut select_query = QueryBuilder::new(format!(
            "SELECT {LINK_COLUMNS} FROM short_links WHERE user_id = "
        ));
        select_query.push_bind(user_id);
        if let Some(pattern) = &search_pattern {
            select_query.push(" AND (short_code ILIKE ");
            select_query.push_bind(pattern);
            select_query.push(" OR original_url ILIKE ");
            select_query.push_bind(pattern);
            select_query.push(")");
        }
        if let Some(is_active) = filter.is_active {
            select_query.push(" AND is_active = ");
            select_query.push_bind(is_active);
        }
        select_query.push(" ORDER BY created_at DESC LIMIT ");
        select_query.push_bind(page_size);
        select_query.push(" OFFSET ");
        select_query.push_bind(offset);

        let rows: Vec<LinkRow> = select_query
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update(
        &self,
        code: &str,
        user_id: i64,
        patch: LinkPatch,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE short_links \
             SET original_url = COALESCE($1, original_url), \
                 is_active = COALESCE($2, is_active), \
                 updated_by = $3, \
                 updated_at = NOW() \
             WHERE short_code = $4 AND user_id = $5 \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(patch.original_url)
        .bind(patch.is_active)
        .bind(user_id)
        .bind(code)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, code: &str, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE short_code = $1 AND user_id = $2")
            .bind(code)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_click(&self, code: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE short_links \
             SET click_count = click_count + 1, last_clicked_at = NOW() \
             WHERE short_code = $1",
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
