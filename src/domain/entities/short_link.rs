//! Short link entity and ownership model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who owns a short link.
///
/// Anonymous links (created without credentials) are unclaimable: no
/// authenticated caller ever matches them, so `get`/`update`/`delete`
/// reject with an ownership error. Ownership comparison is value equality
/// on the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum LinkOwner {
    User(i64),
    Anonymous,
}

impl LinkOwner {
    /// True only for an owned link whose owner id equals `user_id`.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        matches!(self, LinkOwner::User(id) if *id == user_id)
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            LinkOwner::User(id) => Some(*id),
            LinkOwner::Anonymous => None,
        }
    }
}

impl From<Option<i64>> for LinkOwner {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(id) => LinkOwner::User(id),
            None => LinkOwner::Anonymous,
        }
    }
}

impl From<LinkOwner> for Option<i64> {
    fn from(owner: LinkOwner) -> Self {
        owner.as_id()
    }
}

/// A shortened URL mapping.
///
/// The short code is globally unique and case-sensitive. The serialized
/// form of this struct is what gets stored in the destination cache, so it
/// must round-trip through JSON without loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub owner: LinkOwner,
    pub short_code: String,
    pub original_url: String,
    pub is_active: bool,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub owner: LinkOwner,
    pub short_code: String,
    pub original_url: String,
}

/// Partial update for an existing link. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Filter and pagination parameters for the owner-scoped link listing.
#[derive(Debug, Clone, Default)]
pub struct LinkListFilter {
    /// 1-indexed page number.
    pub page: i64,
    pub page_size: i64,
    /// Case-insensitive substring match against code or original URL.
    pub search: Option<String>,
    /// `Some(true)` = active only, `Some(false)` = inactive only.
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_link_matches_its_owner() {
        let owner = LinkOwner::User(7);
        assert!(owner.is_owned_by(7));
        assert!(!owner.is_owned_by(8));
    }

    #[test]
    fn test_anonymous_link_matches_nobody() {
        let owner = LinkOwner::Anonymous;
        assert!(!owner.is_owned_by(0));
        assert!(!owner.is_owned_by(1));
    }

    #[test]
    fn test_owner_round_trips_through_option() {
        assert_eq!(LinkOwner::from(Some(3)), LinkOwner::User(3));
        assert_eq!(LinkOwner::from(None), LinkOwner::Anonymous);
        assert_eq!(Option::<i64>::from(LinkOwner::User(3)), Some(3));
        assert_eq!(Option::<i64>::from(LinkOwner::Anonymous), None);
    }

    #[test]
    fn test_short_link_cache_round_trip() {
        let link = ShortLink {
            id: 1,
            owner: LinkOwner::User(42),
            short_code: "Ab3xYz".to_string(),
            original_url: "https://example.com/a".to_string(),
            is_active: true,
            click_count: 5,
            last_clicked_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: Some(42),
            updated_by: Some(42),
        };

        let json = serde_json::to_string(&link).unwrap();
        let back: ShortLink = serde_json::from_str(&json).unwrap();

        assert_eq!(back.short_code, link.short_code);
        assert_eq!(back.original_url, link.original_url);
        assert_eq!(back.owner, link.owner);
        assert_eq!(back.is_active, link.is_active);
    }
}
