//! HTTP request handlers.

mod auth;
mod health;
mod links;
mod redirect;
mod stats;

pub use auth::{login_handler, logout_handler, refresh_handler, register_handler};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
pub use redirect::redirect_handler;
pub use stats::dashboard_stats_handler;
