//! Click event model for asynchronous click tracking.

use crate::domain::entities::LinkOwner;

/// An in-memory representation of a click for async processing.
///
/// Created in the redirect handler and sent over a bounded channel to the
/// click worker. Carries denormalized data (link id, code, owner) so the
/// worker never has to look anything up before recording, and so cache
/// invalidation for the owner's aggregates needs no extra query.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub short_link_id: i64,
    pub code: String,
    pub owner: LinkOwner,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    pub fn new(
        short_link_id: i64,
        code: String,
        owner: LinkOwner,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            short_link_id,
            code,
            owner,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
