//! In-memory spot repository.
//!
//! Holds the dataset behind a `parking_lot::RwLock` and evaluates the
//! eligibility predicate, ordering, and window in Rust. This is the backend
//! used in tests and single-instance deployments; a SQL backend would express
//! the same predicate as a WHERE clause and the same window as LIMIT/OFFSET.

use parking_lot::RwLock;

use crate::db::models::SpotRow;
use crate::db::repository::{RepositoryResult, SpotRepository};
use crate::models::FilterCriteria;

/// In-memory implementation of [`SpotRepository`].
#[derive(Default)]
pub struct LocalRepository {
    spots: RwLock<Vec<SpotRow>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with rows.
    pub fn with_spots(spots: Vec<SpotRow>) -> Self {
        Self {
            spots: RwLock::new(spots),
        }
    }

    /// Insert a row. Rows are immutable once inserted; the core only reads.
    pub fn insert(&self, row: SpotRow) {
        self.spots.write().push(row);
    }

    fn matching_rows(&self, criteria: &FilterCriteria) -> Vec<SpotRow> {
        let search = criteria.search.as_deref().map(str::to_lowercase);
        self.spots
            .read()
            .iter()
            .filter(|row| row_is_eligible(row, criteria, search.as_deref()))
            .cloned()
            .collect()
    }
}

/// Eligibility predicate shared by the page query and the count query.
fn row_is_eligible(row: &SpotRow, criteria: &FilterCriteria, search_lower: Option<&str>) -> bool {
    if let Some(bbox) = &criteria.bounds {
        // Rows without coordinates are never inside a box, matching SQL
        // BETWEEN semantics on NULL columns.
        match (row.lat, row.lon) {
            (Some(lat), Some(lon)) if bbox.contains(lat, lon) => {}
            _ => return false,
        }
    }

    if let Some(term) = search_lower {
        let title_match = row.title.to_lowercase().contains(term);
        let address_match = row
            .address
            .as_deref()
            .map(|a| a.to_lowercase().contains(term))
            .unwrap_or(false);
        if !title_match && !address_match {
            return false;
        }
    }

    true
}

#[async_trait::async_trait]
impl SpotRepository for LocalRepository {
    async fn query_spots(
        &self,
        criteria: &FilterCriteria,
        fetch_limit: u32,
    ) -> RepositoryResult<Vec<SpotRow>> {
        let mut rows = self.matching_rows(criteria);

        match &criteria.bounds {
            Some(bbox) => {
                // Ascending planar squared distance from the box centroid.
                // Ties are left unbroken; stable order across ties is not part
                // of the contract.
                rows.sort_by(|a, b| {
                    let da = bbox
                        .sq_distance_from_centroid(a.lat.unwrap_or(0.0), a.lon.unwrap_or(0.0));
                    let db = bbox
                        .sq_distance_from_centroid(b.lat.unwrap_or(0.0), b.lon.unwrap_or(0.0));
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            None => rows.sort_by_key(|row| row.id),
        }

        Ok(rows
            .into_iter()
            .skip(criteria.offset as usize)
            .take(fetch_limit as usize)
            .collect())
    }

    async fn count_spots(&self, criteria: &FilterCriteria) -> RepositoryResult<u64> {
        Ok(self.matching_rows(criteria).len() as u64)
    }

    async fn get_spot(&self, id: i64) -> RepositoryResult<Option<SpotRow>> {
        Ok(self.spots.read().iter().find(|row| row.id == id).cloned())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
