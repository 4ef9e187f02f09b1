//! Repository trait for login sessions.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for server-side session state.
///
/// Sessions are soft-revoked only. Activity checks intentionally bypass
/// every cache so revocation takes effect as soon as the write commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Records a new login, returning the session id.
    async fn create(&self, new_session: NewSession) -> Result<i64, AppError>;

    /// Finds a session by its refresh token.
    ///
    /// Only rows with `is_active = true` and an unexpired `expired_at`
    /// match; "never existed", "expired", and "revoked" all collapse to
    /// `Ok(None)` so callers cannot probe session existence.
    async fn find_by_refresh_token(&self, refresh_token: &str)
    -> Result<Option<Session>, AppError>;

    /// Returns true only if the session exists, is active, and is
    /// unexpired. Absent or expired rows yield `Ok(false)`, not an error.
    async fn check_active(&self, session_id: i64) -> Result<bool, AppError>;

    /// Soft-revokes the session holding this refresh token. Idempotent.
    async fn invalidate(&self, refresh_token: &str) -> Result<(), AppError>;

    /// Soft-revokes a session by id. Idempotent.
    async fn invalidate_by_id(&self, session_id: i64) -> Result<(), AppError>;

    /// Soft-revokes every active session belonging to a user.
    async fn invalidate_all_for_user(&self, user_id: i64) -> Result<(), AppError>;
}
