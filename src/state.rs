//! Shared application state.
//!
//! All handles are constructed by the process entry point and injected
//! here; no component owns a global connection.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub cache: Arc<dyn CacheService>,
    /// Bounded queue feeding the click worker; senders never block.
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Public prefix prepended to short codes in responses.
    pub base_url: String,
}
