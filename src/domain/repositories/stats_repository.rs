//! Repository trait for per-user dashboard aggregates.

use crate::domain::entities::DailyVisits;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for aggregate statistics.
///
/// These queries are comparatively expensive; the service layer fronts
/// them with short-TTL cache entries that the click worker invalidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Total number of links owned by the user.
    async fn total_links(&self, user_id: i64) -> Result<i64, AppError>;

    /// Total clicks across all of the user's links.
    async fn total_visits(&self, user_id: i64) -> Result<i64, AppError>;

    /// Per-day click counts over the trailing 7 days, ascending by day.
    async fn last_7_days(&self, user_id: i64) -> Result<Vec<DailyVisits>, AppError>;
}
