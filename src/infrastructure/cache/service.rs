//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache with per-key TTL.
///
/// The cache is a disposable read accelerator: the relational store is
/// always authoritative, writes invalidate entries rather than update
/// them, and implementations must degrade gracefully (cache failures are
/// logged and treated as misses, never propagated to request flow).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a value. `Ok(None)` on miss or on error (fail-open).
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with a TTL in seconds.
    ///
    /// Implementations should log errors and return `Ok(())` to avoid
    /// disrupting the request flow.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes one or more keys. Missing keys are not an error.
    async fn del(&self, keys: &[&str]) -> CacheResult<()>;

    /// Increments an integer counter key.
    async fn incr(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}

/// Destination-cache key for a short code. TTL: [`DESTINATION_TTL_SECONDS`].
pub fn link_destination_key(code: &str) -> String {
    format!("link:{code}:destination")
}

/// Rolling click counter for a short code, incremented alongside the
/// database counter.
pub fn link_clicks_key(code: &str) -> String {
    format!("link:{code}:clicks")
}

/// Per-user total-links aggregate. TTL: [`AGGREGATE_TTL_SECONDS`].
pub fn user_links_key(user_id: i64) -> String {
    format!("user:{user_id}:stats:links")
}

/// Per-user total-visits aggregate. TTL: [`AGGREGATE_TTL_SECONDS`].
pub fn user_visits_key(user_id: i64) -> String {
    format!("user:{user_id}:stats:visits")
}

/// Per-user 7-day click histogram. TTL: [`HISTOGRAM_TTL_SECONDS`].
pub fn user_histogram_key(user_id: i64) -> String {
    format!("analytics:{user_id}:7d")
}

/// TTL for cached short-link destinations (15 minutes).
pub const DESTINATION_TTL_SECONDS: u64 = 900;

/// TTL for per-user aggregate counters (5 minutes).
pub const AGGREGATE_TTL_SECONDS: u64 = 300;

/// TTL for the 7-day histogram (1 minute).
pub const HISTOGRAM_TTL_SECONDS: u64 = 60;
