//! Fixed-window rate limiting keyed by client identifier.
//!
//! A soft, best-effort guard against abuse: counters live in-process, so the
//! guarantee holds for a single-instance deployment only. Multi-instance
//! deployments need an external shared counter store behind the same
//! interface. Not a hard security boundary.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-identifier window state.
#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    /// Absolute expiry of the current window, UTC milliseconds.
    reset_time: i64,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Absolute expiry of the current window, UTC milliseconds.
    pub reset_time: i64,
}

/// Fixed-window counter keyed by client identifier.
#[derive(Clone)]
pub struct RateLimiter {
    limit: u32,
    window_ms: i64,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `limit` requests per `window_ms` window.
    pub fn new(limit: u32, window_ms: i64) -> Self {
        Self {
            limit,
            window_ms,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Maximum requests per window.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Check whether a request from `identifier` is within limits.
    ///
    /// Absence of an entry, or an expired one, starts a fresh window with
    /// count 1. Once the count exceeds the limit the request is denied with
    /// the existing reset time unchanged; the window never resets early.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        self.check_at(identifier, Utc::now().timestamp_millis())
    }

    /// [`check`](Self::check) with an explicit clock, for deterministic tests.
    pub fn check_at(&self, identifier: &str, now_ms: i64) -> RateLimitDecision {
        let mut entries = self.entries.lock();

        match entries.get_mut(identifier) {
            Some(entry) if now_ms <= entry.reset_time => {
                if entry.count >= self.limit {
                    return RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_time: entry.reset_time,
                    };
                }
                entry.count += 1;
                RateLimitDecision {
                    allowed: true,
                    remaining: self.limit - entry.count,
                    reset_time: entry.reset_time,
                }
            }
            _ => {
                let reset_time = now_ms + self.window_ms;
                entries.insert(
                    identifier.to_string(),
                    RateLimitEntry {
                        count: 1,
                        reset_time,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    remaining: self.limit.saturating_sub(1),
                    reset_time,
                }
            }
        }
    }

    /// Reclaim entries whose window has expired.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis())
    }

    /// [`sweep`](Self::sweep) with an explicit clock, for deterministic tests.
    pub fn sweep_at(&self, now_ms: i64) {
        self.entries.lock().retain(|_, entry| now_ms <= entry.reset_time);
    }

    /// Number of live entries, expired or not.
    pub fn tracked_identifiers(&self) -> usize {
        self.entries.lock().len()
    }

    /// Spawn a background task sweeping expired entries every `period`.
    pub fn spawn_sweeper(&self, period: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                limiter.sweep();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_window_allows_then_denies() {
        let limiter = RateLimiter::new(3, 60_000);
        let t0 = 1_000_000;

        let d1 = limiter.check_at("1.2.3.4", t0);
        let d2 = limiter.check_at("1.2.3.4", t0 + 10);
        let d3 = limiter.check_at("1.2.3.4", t0 + 20);
        let d4 = limiter.check_at("1.2.3.4", t0 + 30);

        assert!(d1.allowed && d2.allowed && d3.allowed);
        assert!(!d4.allowed);
        assert_eq!(d4.remaining, 0);
        // Denial does not reset the window early.
        assert_eq!(d4.reset_time, d1.reset_time);
    }

    #[test]
    fn test_window_expiry_starts_fresh() {
        let limiter = RateLimiter::new(3, 60_000);
        let t0 = 1_000_000;
        for i in 0..4 {
            limiter.check_at("1.2.3.4", t0 + i);
        }

        let d5 = limiter.check_at("1.2.3.4", t0 + 60_001);
        assert!(d5.allowed);
        assert_eq!(d5.remaining, 2);
        assert_eq!(d5.reset_time, t0 + 60_001 + 60_000);
    }

    #[test]
    fn test_identifiers_are_independent() {
        let limiter = RateLimiter::new(1, 60_000);
        let t0 = 0;
        assert!(limiter.check_at("a", t0).allowed);
        assert!(!limiter.check_at("a", t0).allowed);
        assert!(limiter.check_at("b", t0).allowed);
    }

    #[test]
    fn test_remaining_counts_down() {
        let limiter = RateLimiter::new(3, 60_000);
        assert_eq!(limiter.check_at("x", 0).remaining, 2);
        assert_eq!(limiter.check_at("x", 1).remaining, 1);
        assert_eq!(limiter.check_at("x", 2).remaining, 0);
    }

    #[test]
    fn test_sweep_reclaims_only_expired() {
        let limiter = RateLimiter::new(3, 60_000);
        limiter.check_at("old", 0);
        limiter.check_at("fresh", 50_000);
        assert_eq!(limiter.tracked_identifiers(), 2);

        limiter.sweep_at(60_001);
        assert_eq!(limiter.tracked_identifiers(), 1);

        // The swept identifier gets a fresh window, not a stale count.
        let d = limiter.check_at("old", 60_002);
        assert!(d.allowed);
        assert_eq!(d.remaining, 2);
    }
}
