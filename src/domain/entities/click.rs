//! Click analytics entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded visit to a short link. Append-only.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub short_link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: String,
    pub referer: String,
    pub user_agent: String,
    pub country: String,
    pub city: String,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

/// Input data for appending a click row.
///
/// Geo fields are best-effort and default to empty strings when no
/// resolver is configured.
#[derive(Debug, Clone, Default)]
pub struct NewClick {
    pub short_link_id: i64,
    pub ip_address: String,
    pub referer: String,
    pub user_agent: String,
    pub country: String,
    pub city: String,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

/// One bucket of the 7-day visit histogram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyVisits {
    pub day: chrono::NaiveDate,
    pub count: i64,
}
