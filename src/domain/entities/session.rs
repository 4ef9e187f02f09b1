//! Login session entity.

use chrono::{DateTime, Utc};

/// One authenticated login.
///
/// A session is usable for refresh only while `is_active` is true and
/// `expired_at` lies in the future. Sessions are soft-revoked (never
/// deleted): logout flips `is_active` and stamps `logout_time`.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub refresh_token: String,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
    pub expired_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub is_active: bool,
}

/// Input data for recording a new login.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub refresh_token: String,
    pub expired_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}
