//! Viewport synchronization state machine.
//!
//! Coordinates map-reported bounds with the fetch pipeline and the URL. Three
//! phases: `Uninitialized` (no bounds observed yet, fetching suspended),
//! `BoundsKnown` (first report arrived, fetching enabled), and `Steady`
//! (subsequent reports debounced). The first bounds report after mount,
//! concrete or unbounded, unsuspends fetching immediately; every later change
//! waits out a 500 ms debounce so a pan/zoom burst collapses into one
//! downstream query. URL mirroring uses a separate, shorter 300 ms debounce
//! so browser history gets a navigable snapshot without an entry per
//! keystroke or per drag frame.
//!
//! Debounce timers are owned, abortable task handles: rescheduling aborts the
//! pending timer first, so at most one trigger is pending per channel, and
//! teardown cancels everything.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::url_state::UrlState;
use crate::models::BoundingBox;

/// Delay applied to map bounds changes after the first.
pub const BOUNDS_DEBOUNCE: Duration = Duration::from_millis(500);
/// Delay applied to URL snapshots.
pub const URL_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No bounds observed yet; fetching is suspended.
    Uninitialized,
    /// First bounds report arrived; fetching is enabled.
    BoundsKnown,
    /// Subsequent bounds changes are debounced.
    Steady,
}

/// Drives bounds-triggered refetches and URL mirroring.
///
/// Applied bounds (`None` meaning "no geographic filter") are delivered on
/// the bounds channel; encoded URL snapshots on the URL channel.
pub struct ViewportSyncController {
    phase: SyncPhase,
    /// Set when initial state came from the URL; the first live map report
    /// is suppressed so it cannot clobber the restored viewport.
    restored_from_url: bool,
    bounds_tx: mpsc::UnboundedSender<Option<BoundingBox>>,
    url_tx: mpsc::UnboundedSender<String>,
    pending_bounds: Option<JoinHandle<()>>,
    pending_url: Option<JoinHandle<()>>,
}

impl ViewportSyncController {
    /// Create a controller and the receiving ends of its two channels.
    pub fn new(
        restored_from_url: bool,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<Option<BoundingBox>>,
        mpsc::UnboundedReceiver<String>,
    ) {
        let (bounds_tx, bounds_rx) = mpsc::unbounded_channel();
        let (url_tx, url_rx) = mpsc::unbounded_channel();
        (
            Self {
                phase: SyncPhase::Uninitialized,
                restored_from_url,
                bounds_tx,
                url_tx,
                pending_bounds: None,
                pending_url: None,
            },
            bounds_rx,
            url_rx,
        )
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Whether downstream fetching is enabled.
    pub fn fetch_enabled(&self) -> bool {
        self.phase != SyncPhase::Uninitialized
    }

    /// Feed a map-reported bounds update (`None` = world-wrap viewport).
    pub fn on_map_bounds(&mut self, bounds: Option<BoundingBox>) {
        match self.phase {
            SyncPhase::Uninitialized => {
                self.phase = SyncPhase::BoundsKnown;
                if self.restored_from_url {
                    // The restored viewport is authoritative; drop the value
                    // but unsuspend fetching.
                    return;
                }
                let _ = self.bounds_tx.send(bounds);
            }
            SyncPhase::BoundsKnown | SyncPhase::Steady => {
                self.phase = SyncPhase::Steady;
                self.cancel_pending_bounds();
                let tx = self.bounds_tx.clone();
                self.pending_bounds = Some(tokio::spawn(async move {
                    tokio::time::sleep(BOUNDS_DEBOUNCE).await;
                    let _ = tx.send(bounds);
                }));
            }
        }
    }

    /// Mirror application state into the URL, debounced unless `immediate`.
    pub fn update_url(&mut self, state: &UrlState, immediate: bool) {
        self.cancel_pending_url();
        let encoded = state.encode();
        if immediate {
            let _ = self.url_tx.send(encoded);
            return;
        }
        let tx = self.url_tx.clone();
        self.pending_url = Some(tokio::spawn(async move {
            tokio::time::sleep(URL_DEBOUNCE).await;
            let _ = tx.send(encoded);
        }));
    }

    /// Cancel all pending debounce timers.
    pub fn teardown(&mut self) {
        self.cancel_pending_bounds();
        self.cancel_pending_url();
    }

    fn cancel_pending_bounds(&mut self) {
        if let Some(handle) = self.pending_bounds.take() {
            handle.abort();
        }
    }

    fn cancel_pending_url(&mut self) {
        if let Some(handle) = self.pending_url.take() {
            handle.abort();
        }
    }
}

impl Drop for ViewportSyncController {
    fn drop(&mut self) {
        self.teardown();
    }
}
