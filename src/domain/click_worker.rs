//! Background worker persisting click analytics off the redirect path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;
use woothee::parser::Parser;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{LinkOwner, NewClick};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::cache::{
    CacheService, link_clicks_key, user_histogram_key, user_links_key, user_visits_key,
};

/// Consumes click events until the channel closes.
///
/// Per event: bump the link's click counter, append the analytics row,
/// then invalidate the owner's aggregate caches. The contract is
/// at-most-effort — each step logs and swallows its own failure, nothing
/// here ever reaches the user who was redirected, and ordering relative
/// to the redirect response is unspecified.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    cache: Arc<dyn CacheService>,
) {
    let ua_parser = Parser::new();

    while let Some(event) = rx.recv().await {
        if let Err(e) = links.increment_click(&event.code).await {
            warn!(code = %event.code, error = %e, "failed to increment click counter");
        } else if let Err(e) = cache.incr(&link_clicks_key(&event.code)).await {
            warn!(code = %event.code, error = %e, "failed to bump cached click counter");
        }

        let new_click = build_click(&ua_parser, &event);
        if let Err(e) = clicks.insert(new_click).await {
            warn!(code = %event.code, error = %e, "failed to record click");
            continue;
        }

        if let LinkOwner::User(user_id) = event.owner {
            let keys = [
                user_links_key(user_id),
                user_visits_key(user_id),
                user_histogram_key(user_id),
            ];
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            if let Err(e) = cache.del(&key_refs).await {
                warn!(user_id, error = %e, "failed to invalidate aggregate caches");
            }
        }
    }
}

/// Derives device/browser/OS from the user agent, best-effort. Geo fields
/// stay empty until a resolver is wired in.
fn build_click(ua_parser: &Parser, event: &ClickEvent) -> NewClick {
    let user_agent = event.user_agent.clone().unwrap_or_default();
    let parsed = ua_parser.parse(&user_agent);

    let (device_type, browser, os) = match &parsed {
        Some(result) => (
            result.category.to_string(),
            result.name.to_string(),
            result.os.to_string(),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    NewClick {
        short_link_id: event.short_link_id,
        ip_address: event.ip.clone().unwrap_or_default(),
        referer: event.referer.clone().unwrap_or_default(),
        user_agent,
        country: String::new(),
        city: String::new(),
        device_type,
        browser,
        os,
    }
}
