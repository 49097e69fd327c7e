//! Incremental page loading over the query endpoint.
//!
//! The loader owns the merged result set for one query key (bounds + search
//! text + page size). "Load more" requests are serialized against the cursor
//! so no two outstanding requests claim the same offset, and a response that
//! arrives after the query key changed is discarded rather than merged into
//! the wrong result set. Fetch errors leave already-loaded pages intact.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::{Spot, SpotsPage};
use crate::models::BoundingBox;

/// Everything that identifies one logical query. Changing any part of it
/// invalidates in-flight pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpotsQueryKey {
    pub bounds: Option<BoundingBox>,
    pub search: String,
    pub limit: u32,
}

/// Error surfaced by a page fetch; retryable from the UI's point of view.
#[derive(Debug, Clone, thiserror::Error)]
#[error("spots fetch failed: {0}")]
pub struct FetchError(pub String);

/// Transport abstraction over the query endpoint.
#[async_trait]
pub trait SpotsApi: Send + Sync {
    async fn fetch_page(&self, key: &SpotsQueryKey, offset: u32) -> Result<SpotsPage, FetchError>;
}

#[derive(Default)]
struct LoaderState {
    key: SpotsQueryKey,
    spots: Vec<Spot>,
    seen_ids: HashSet<i64>,
    next_offset: u32,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    last_total: Option<u64>,
}

/// Incremental-loading client for the spots listing.
pub struct SpotLoader {
    api: Arc<dyn SpotsApi>,
    state: Mutex<LoaderState>,
    /// Bumped on every query-key change; a fetch started under an older
    /// generation discards its response.
    generation: AtomicU64,
}

impl SpotLoader {
    pub fn new(api: Arc<dyn SpotsApi>, key: SpotsQueryKey) -> Self {
        let state = LoaderState {
            key,
            has_more: true,
            ..Default::default()
        };
        Self {
            api,
            state: Mutex::new(state),
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the query key, discarding loaded pages if it actually changed.
    pub fn set_query(&self, key: SpotsQueryKey) {
        let mut state = self.state.lock();
        if state.key == key {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = LoaderState {
            key,
            has_more: true,
            ..Default::default()
        };
    }

    /// Merged, de-duplicated records loaded so far.
    pub fn spots(&self) -> Vec<Spot> {
        self.state.lock().spots.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Last fetch error, if the most recent load failed.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Total records the server reported for the current predicate.
    pub fn total(&self) -> Option<u64> {
        self.state.lock().total()
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(true)` when a page was merged, `Ok(false)` when there was
    /// nothing to do (no more pages, or a fetch already in flight claiming
    /// the cursor).
    pub async fn load_more(&self) -> Result<bool, FetchError> {
        let (key, offset, generation) = {
            let mut state = self.state.lock();
            if state.loading || !state.has_more {
                return Ok(false);
            }
            state.loading = true;
            state.error = None;
            (
                state.key.clone(),
                state.next_offset,
                self.generation.load(Ordering::SeqCst),
            )
        };

        let result = self.api.fetch_page(&key, offset).await;

        let mut state = self.state.lock();

        // The query key changed while the request was in flight; the
        // response no longer matches the current result set.
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(false);
        }
        state.loading = false;

        match result {
            Ok(page) => {
                state.next_offset = offset + page.spots.len() as u32;
                state.has_more = page.pagination.has_more;
                state.last_total = page.pagination.total;
                for spot in page.spots {
                    if state.seen_ids.insert(spot.id) {
                        state.spots.push(spot);
                    }
                }
                Ok(true)
            }
            Err(e) => {
                state.error = Some(e.0.clone());
                Err(e)
            }
        }
    }
}

impl LoaderState {
    fn total(&self) -> Option<u64> {
        self.last_total
    }
}
