//! User account entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account.
///
/// The password field holds the PHC-formatted Argon2id hash and is never
/// serialized outward.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a new user. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}
