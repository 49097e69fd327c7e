//! Service layer over the repository trait.
//!
//! These functions implement the query/pagination contract on top of any
//! `SpotRepository` backend: the limit+1 over-fetch that derives `hasMore`
//! without a count query on the hot path, the secondary total count, and row
//! shaping into the public record format.

use crate::api::{PaginationInfo, Spot, SpotsPage};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, SpotRepository};
use crate::models::FilterCriteria;

/// Execute a validated query and assemble one page of results.
///
/// Fetches `limit + 1` eligible rows; if the extra row comes back, another
/// page exists and the extra row is trimmed before shaping. The total count
/// reuses the same eligibility predicate without the window.
pub async fn query_spots_page(
    repo: &dyn SpotRepository,
    criteria: &FilterCriteria,
) -> RepositoryResult<SpotsPage> {
    let fetch_limit = criteria.limit + 1;
    let mut rows = repo
        .query_spots(criteria, fetch_limit)
        .await
        .map_err(|e| e.with_operation("query_spots"))?;

    let has_more = rows.len() as u32 > criteria.limit;
    if has_more {
        rows.truncate(criteria.limit as usize);
    }

    let total = repo
        .count_spots(criteria)
        .await
        .map_err(|e| e.with_operation("count_spots"))?;

    let spots: Vec<Spot> = rows.into_iter().map(|row| row.into_spot()).collect();

    Ok(SpotsPage {
        spots,
        pagination: PaginationInfo {
            limit: criteria.limit,
            offset: criteria.offset,
            has_more,
            total: Some(total),
        },
    })
}

/// Fetch and shape a single spot by id.
pub async fn get_spot(repo: &dyn SpotRepository, id: i64) -> RepositoryResult<Spot> {
    let row = repo
        .get_spot(id)
        .await
        .map_err(|e| e.with_operation("get_spot"))?;
    match row {
        Some(row) => Ok(row.into_spot()),
        None => Err(RepositoryError::not_found_with_context(
            format!("spot {} not found", id),
            ErrorContext::new("get_spot").with_entity_id(id),
        )),
    }
}

/// Whether the backing store is reachable.
pub async fn health_check(repo: &dyn SpotRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
