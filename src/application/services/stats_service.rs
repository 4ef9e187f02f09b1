//! Per-user dashboard aggregates, served cache-aside.

use std::sync::Arc;

use crate::domain::entities::DailyVisits;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{
    AGGREGATE_TTL_SECONDS, CacheService, HISTOGRAM_TTL_SECONDS, user_histogram_key,
    user_links_key, user_visits_key,
};
use serde::Serialize;
use tracing::warn;

/// Aggregate statistics for one user's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOverview {
    pub total_links: i64,
    pub total_visits: i64,
    pub last_7_days: Vec<DailyVisits>,
}

/// Service for dashboard aggregates.
///
/// Counters live behind short-TTL cache entries; the click worker deletes
/// them after every insert, so the dashboard stays eventually consistent
/// within one click. The underlying aggregate queries remain the source
/// of truth.
pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
    cache: Arc<dyn CacheService>,
}

impl StatsService {
    pub fn new(stats: Arc<dyn StatsRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { stats, cache }
    }

    /// Returns the user's dashboard aggregates.
    pub async fn overview(&self, user_id: i64) -> Result<StatsOverview, AppError> {
        let total_links = self
            .cached_count(&user_links_key(user_id), || self.stats.total_links(user_id))
            .await?;
        let total_visits = self
            .cached_count(&user_visits_key(user_id), || {
                self.stats.total_visits(user_id)
            })
            .await?;
        let last_7_days = self.cached_histogram(user_id).await?;

        Ok(StatsOverview {
            total_links,
            total_visits,
            last_7_days,
        })
    }

    async fn cached_count<F, Fut>(&self, key: &str, load: F) -> Result<i64, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<i64, AppError>>,
    {
        if let Ok(Some(cached)) = self.cache.get(key).await {
            if let Ok(value) = cached.parse::<i64>() {
                return Ok(value);
            }
        }

        let value = load().await?;

        if let Err(e) = self
            .cache
            .set(key, &value.to_string(), AGGREGATE_TTL_SECONDS)
            .await
        {
            warn!(key, error = %e, "failed to cache aggregate counter");
        }

        Ok(value)
    }

    async fn cached_histogram(&self, user_id: i64) -> Result<Vec<DailyVisits>, AppError> {
        let key = user_histogram_key(user_id);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            if let Ok(histogram) = serde_json::from_str::<Vec<DailyVisits>>(&cached) {
                return Ok(histogram);
            }
        }

        let histogram = self.stats.last_7_days(user_id).await?;

        match serde_json::to_string(&histogram) {
            Ok(json) => {
                if let Err(e) = self.cache.set(&key, &json, HISTOGRAM_TTL_SECONDS).await {
                    warn!(key, error = %e, "failed to cache histogram");
                }
            }
            Err(e) => warn!(key, error = %e, "failed to serialize histogram"),
        }

        Ok(histogram)
    }
}
