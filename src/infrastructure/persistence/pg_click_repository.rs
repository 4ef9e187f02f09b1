//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only clicks table.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO clicks \
             (short_link_id, ip_address, referer, user_agent, country, city, device_type, browser, os) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(new_click.short_link_id)
        .bind(&new_click.ip_address)
        .bind(&new_click.referer)
        .bind(&new_click.user_agent)
        .bind(&new_click.country)
        .bind(&new_click.city)
        .bind(&new_click.device_type)
        .bind(&new_click.browser)
        .bind(&new_click.os)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
