//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSession, Session};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for server-side session state.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    user_id: i64,
    refresh_token: String,
    login_time: DateTime<Utc>,
    logout_time: Option<DateTime<Utc>>,
    expired_at: DateTime<Utc>,
    ip_address: String,
    user_agent: String,
    is_active: bool,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            refresh_token: row.refresh_token,
            login_time: row.login_time,
            logout_time: row.logout_time,
            expired_at: row.expired_at,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<i64, AppError> {
        let session_id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (user_id, refresh_token, expired_at, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(new_session.user_id)
        .bind(&new_session.refresh_token)
        .bind(new_session.expired_at)
        .bind(&new_session.ip_address)
        .bind(&new_session.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(session_id)
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT id, user_id, refresh_token, login_time, logout_time, expired_at, \
                    ip_address, user_agent, is_active \
             FROM sessions \
             WHERE refresh_token = $1 AND is_active = TRUE AND expired_at > NOW()",
        )
        .bind(refresh_token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn check_active(&self, session_id: i64) -> Result<bool, AppError> {
        let is_active: Option<bool> = sqlx::query_scalar(
            "SELECT is_active FROM sessions WHERE id = $1 AND expired_at > NOW()",
        )
        .bind(session_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(is_active.unwrap_or(false))
    }

    async fn invalidate(&self, refresh_token: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE sessions \
             SET is_active = FALSE, logout_time = NOW(), updated_at = NOW() \
             WHERE refresh_token = $1 AND is_active = TRUE",
        )
        .bind(refresh_token)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn invalidate_by_id(&self, session_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE sessions \
             SET is_active = FALSE, logout_time = NOW(), updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(session_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn invalidate_all_for_user(&self, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE sessions \
             SET is_active = FALSE, logout_time = NOW(), updated_at = NOW() \
             WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
