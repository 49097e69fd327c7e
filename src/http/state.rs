//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::SpotRepository;
use crate::services::RateLimiter;

/// Shared application state passed to all handlers.
///
/// The rate limiter is the only mutable shared resource; everything else is
/// read-only per request.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn SpotRepository>,
    /// Fixed-window rate limiter guarding the query endpoints
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: Arc<dyn SpotRepository>, rate_limiter: RateLimiter) -> Self {
        Self {
            repository,
            rate_limiter,
        }
    }
}
