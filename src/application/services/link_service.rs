//! Short link creation, resolution, and mutation.

use std::sync::Arc;

use crate::domain::entities::{LinkListFilter, LinkOwner, LinkPatch, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, DESTINATION_TTL_SECONDS, link_destination_key};
use crate::utils::code_generator::generate_code;
use tracing::warn;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Collision-retry ceiling for code generation. Bounds an otherwise
/// unbounded loop; exhausting it surfaces a conflict instead of spinning.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service owning the cache-aside read path and invalidation-on-write for
/// short links.
///
/// The database is authoritative; the cache holds serialized [`ShortLink`]
/// records for up to [`DESTINATION_TTL_SECONDS`] and is invalidated (never
/// updated in place) on every mutation. A reader racing a mutation may see
/// a stale entry until the invalidation lands; that window is bounded by
/// the TTL and accepted by design.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { links, cache }
    }

    /// Creates a short link with a freshly generated unique code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when
    /// [`MAX_GENERATION_ATTEMPTS`] consecutive candidate codes already
    /// exist in the store.
    pub async fn create_link(
        &self,
        owner: LinkOwner,
        original_url: String,
    ) -> Result<ShortLink, AppError> {
        let code = self.generate_unique_code().await?;

        // Defensive: a stale cache entry under this code (left over from a
        // prior soft state) must not shadow the new row.
        self.invalidate_destination(&code).await;

        self.links
            .create(NewShortLink {
                owner,
                short_code: code,
                original_url,
            })
            .await
    }

    /// Resolves a short code to its record, cache-aside.
    ///
    /// On a cache hit the database is not touched. On a miss the record is
    /// read from the store, cached with a bounded TTL, and returned.
    /// Inactive links resolve successfully here; rejecting them is the
    /// redirect path's decision. The returned record may be stale by up to
    /// the cache TTL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let cache_key = link_destination_key(code);

        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            match serde_json::from_str::<ShortLink>(&cached) {
                Ok(link) => return Ok(link),
                Err(e) => {
                    // Undecodable entries are treated as misses and will be
                    // overwritten below.
                    warn!(code, error = %e, "discarding undecodable cache entry");
                }
            }
        }

        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found"))?;

        match serde_json::to_string(&link) {
            Ok(json) => {
                if let Err(e) = self
                    .cache
                    .set(&cache_key, &json, DESTINATION_TTL_SECONDS)
                    .await
                {
                    warn!(code, error = %e, "failed to cache resolved link");
                }
            }
            Err(e) => warn!(code, error = %e, "failed to serialize link for cache"),
        }

        Ok(link)
    }

    /// Retrieves a link on behalf of its owner.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the code does not exist;
    /// [`AppError::Forbidden`] if the caller does not own it (anonymous
    /// links match no caller).
    pub async fn get_link(&self, code: &str, user_id: i64) -> Result<ShortLink, AppError> {
        let link = self.resolve(code).await?;

        if !link.owner.is_owned_by(user_id) {
            return Err(AppError::forbidden("Access denied"));
        }

        Ok(link)
    }

    /// Applies a partial update to an owned link and invalidates its
    /// cache entry once the write commits.
    ///
    /// Unset patch fields are left unchanged. The existence check runs
    /// before the ownership check so a missing code reports NotFound, not
    /// Forbidden.
    pub async fn update_link(
        &self,
        code: &str,
        user_id: i64,
        patch: LinkPatch,
    ) -> Result<ShortLink, AppError> {
        let existing = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found"))?;

        if !existing.owner.is_owned_by(user_id) {
            return Err(AppError::forbidden("Access denied"));
        }

        let updated = self
            .links
            .update(code, user_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found"))?;

        self.invalidate_destination(code).await;

        Ok(updated)
    }

    /// Deletes an owned link and invalidates its cache entry.
    ///
    /// A zero-row deletion is surfaced, never treated as success.
    pub async fn delete_link(&self, code: &str, user_id: i64) -> Result<(), AppError> {
        let existing = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found"))?;

        if !existing.owner.is_owned_by(user_id) {
            return Err(AppError::forbidden("Access denied"));
        }

        let deleted = self.links.delete(code, user_id).await?;
        if !deleted {
            return Err(AppError::not_found("Short link not found"));
        }

        self.invalidate_destination(code).await;

        Ok(())
    }

    /// Lists the caller's links, newest first, with optional search and
    /// status filtering. Returns the page and the total matching count.
    pub async fn list_links(
        &self,
        user_id: i64,
        filter: LinkListFilter,
    ) -> Result<(Vec<ShortLink>, i64), AppError> {
        self.links.list_by_owner(user_id, filter).await
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code(CODE_LENGTH);
            if !self.links.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::conflict(
            "Failed to generate a unique short code",
        ))
    }

    async fn invalidate_destination(&self, code: &str) {
        let key = link_destination_key(code);
        if let Err(e) = self.cache.del(&[key.as_str()]).await {
            warn!(code, error = %e, "failed to invalidate link cache");
        }
    }
}
