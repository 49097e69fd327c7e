//! Cross-origin access control.
//!
//! Origins are checked against a configured allowlist plus a permissive
//! exact-host development rule (localhost / 127.0.0.1 on any port). A
//! non-matching origin simply gets no CORS headers; the denial is logged for
//! diagnosis and never surfaced as an error to the caller.

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Preflight cache lifetime. The allowlist changes rarely.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Whether `origin` may be echoed in the access-control headers.
pub fn origin_allowed(origin: &str, allowlist: &[String]) -> bool {
    if allowlist.iter().any(|allowed| allowed == origin) {
        return true;
    }
    is_local_dev_origin(origin)
}

/// Exact-host development rule: http(s) on localhost or 127.0.0.1, any port.
fn is_local_dev_origin(origin: &str) -> bool {
    let rest = match origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(':').next().unwrap_or("");
    let port = rest.split(':').nth(1);
    let port_ok = match port {
        None => true,
        Some(p) => !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()),
    };
    (host == "localhost" || host == "127.0.0.1") && port_ok
}

/// Build the CORS layer for the router.
pub fn cors_layer(allowlist: Vec<String>) -> CorsLayer {
    let predicate = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let allowed = origin
            .to_str()
            .map(|origin| origin_allowed(origin, &allowlist))
            .unwrap_or(false);
        if !allowed {
            tracing::debug!(origin = ?origin, "origin rejected by CORS gate");
        }
        allowed
    });

    CorsLayer::new()
        .allow_origin(predicate)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(PREFLIGHT_MAX_AGE)
}
