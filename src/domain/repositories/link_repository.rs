//! Repository trait for short link data access.

use crate::domain::entities::{LinkListFilter, LinkPatch, NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The database is the store of record; the caching layer sits above this
/// trait, never inside it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link, returning the row with server-assigned
    /// id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists,
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code (case-sensitive).
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns true if a link with this short code exists.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists links owned by `user_id` with filtering and pagination.
    ///
    /// Returns the page plus the total matching count, ordered
    /// newest-created-first.
    async fn list_by_owner(
        &self,
        user_id: i64,
        filter: LinkListFilter,
    ) -> Result<(Vec<ShortLink>, i64), AppError>;

    /// Partially updates a link owned by `user_id`.
    ///
    /// Only fields present in [`LinkPatch`] are modified. Returns
    /// `Ok(None)` if no row matches code + owner (gone, or a concurrent
    /// owner change).
    async fn update(
        &self,
        code: &str,
        user_id: i64,
        patch: LinkPatch,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Hard-deletes a link owned by `user_id`.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` otherwise —
    /// a zero-row deletion is never silent success at the service layer.
    async fn delete(&self, code: &str, user_id: i64) -> Result<bool, AppError>;

    /// Atomically increments the click counter and stamps
    /// `last_clicked_at` for the given code.
    async fn increment_click(&self, code: &str) -> Result<(), AppError>;
}
