//! Client-side engine: viewport reconciliation, incremental loading, and
//! URL-state synchronization.
//!
//! These pieces run next to the map UI. They consume map-reported viewport
//! extents, decide when a refetch is warranted, keep paged results merged and
//! de-duplicated, and mirror application state into a shareable URL.

pub mod loader;
pub mod sync;
pub mod url_state;
pub mod viewport;

pub use loader::{FetchError, SpotLoader, SpotsApi, SpotsQueryKey};
pub use sync::{SyncPhase, ViewportSyncController};
pub use url_state::{FilterOptions, UrlState};
pub use viewport::{clamp_lat, normalize_lon, normalize_viewport, RawViewport};
