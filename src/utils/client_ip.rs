//! Client IP extraction.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Best-effort client IP: the first `X-Forwarded-For` hop when present,
/// otherwise the peer socket address.
pub fn client_ip(headers: &HeaderMap, addr: &SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}
