//! Repository trait for the spot record store.
//!
//! The trait is the seam between the query service and a concrete backend.
//! Backends return raw [`SpotRow`] values, already filtered, ordered, and
//! windowed; row shaping into the public record format happens in the service
//! layer.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::db::models::SpotRow;
use crate::models::FilterCriteria;

/// Abstract interface over the point-record store.
///
/// Implementations apply the eligibility predicate derived from
/// [`FilterCriteria`] (bounding box, case-insensitive substring search), the
/// ordering contract (centroid distance with a box, ascending id without),
/// and offset windowing.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// Fetch eligible rows, ordered, starting at `criteria.offset`.
    ///
    /// `fetch_limit` is the number of rows to return and is passed separately
    /// from `criteria.limit` so the caller can over-fetch one row to detect a
    /// following page without a count query.
    async fn query_spots(
        &self,
        criteria: &FilterCriteria,
        fetch_limit: u32,
    ) -> RepositoryResult<Vec<SpotRow>>;

    /// Count all rows matching the eligibility predicate, ignoring the
    /// limit/offset window.
    async fn count_spots(&self, criteria: &FilterCriteria) -> RepositoryResult<u64>;

    /// Fetch a single row by id.
    async fn get_spot(&self, id: i64) -> RepositoryResult<Option<SpotRow>>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
