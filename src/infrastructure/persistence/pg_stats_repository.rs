//! PostgreSQL implementation of the statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::DailyVisits;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-user dashboard aggregates.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn total_links(&self, user_id: i64) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(total)
    }

    async fn total_visits(&self, user_id: i64) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) \
             FROM clicks c \
             JOIN short_links sl ON sl.id = c.short_link_id \
             WHERE sl.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total)
    }

    async fn last_7_days(&self, user_id: i64) -> Result<Vec<DailyVisits>, AppError> {
        let rows: Vec<(chrono::NaiveDate, i64)> = sqlx::query_as(
            "SELECT DATE(c.clicked_at) AS day, COUNT(*) \
             FROM clicks c \
             JOIN short_links sl ON sl.id = c.short_link_id \
             WHERE sl.user_id = $1 \
               AND c.clicked_at >= NOW() - INTERVAL '7 days' \
             GROUP BY day \
             ORDER BY day ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(day, count)| DailyVisits { day, count })
            .collect())
    }
}
