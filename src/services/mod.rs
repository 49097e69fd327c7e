//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository layer. The rate
//! limiter is the one piece of shared mutable state in the server; it is
//! constructed once and injected through application state rather than
//! accessed as a module-level singleton.

pub mod rate_limiter;

pub use rate_limiter::{RateLimitDecision, RateLimiter};
