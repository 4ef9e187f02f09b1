//! Caching layer for fast redirects and dashboard aggregates.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{
    AGGREGATE_TTL_SECONDS, CacheError, CacheResult, CacheService, DESTINATION_TTL_SECONDS,
    HISTOGRAM_TTL_SECONDS, link_clicks_key, link_destination_key, user_histogram_key,
    user_links_key, user_visits_key,
};
