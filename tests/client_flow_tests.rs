//! End-to-end client pipeline tests.
//!
//! Exercises the full path a map client takes: raw viewport coordinates are
//! normalized into a bounding box, the box becomes part of a query key, and
//! the incremental loader pages through a service-backed API.

use async_trait::async_trait;
use std::sync::Arc;

use spot_atlas::api::SpotsPage;
use spot_atlas::client::{normalize_viewport, RawViewport, SpotLoader, SpotsApi, SpotsQueryKey};
use spot_atlas::client::{FetchError, UrlState};
use spot_atlas::db::models::SpotRow;
use spot_atlas::db::repositories::LocalRepository;
use spot_atlas::db::{query_spots_page, SpotRepository};
use spot_atlas::models::FilterCriteria;

/// [`SpotsApi`] backed directly by the service layer, standing in for the
/// HTTP transport.
struct ServiceApi {
    repo: Arc<dyn SpotRepository>,
}

#[async_trait]
impl SpotsApi for ServiceApi {
    async fn fetch_page(&self, key: &SpotsQueryKey, offset: u32) -> Result<SpotsPage, FetchError> {
        let criteria = FilterCriteria {
            limit: key.limit,
            offset,
            search: if key.search.is_empty() {
                None
            } else {
                Some(key.search.clone())
            },
            bounds: key.bounds,
        };
        query_spots_page(self.repo.as_ref(), &criteria)
            .await
            .map_err(|e| FetchError(e.to_string()))
    }
}

fn spot(id: i64, lat: f64, lon: f64) -> SpotRow {
    SpotRow {
        id,
        title: format!("Spot {}", id),
        name: None,
        lat: Some(lat),
        lon: Some(lon),
        address: None,
        equipment: None,
        disciplines: None,
        description: None,
        features_type: None,
        images: None,
        rating: None,
    }
}

#[tokio::test]
async fn test_viewport_to_loaded_pages() {
    // Map viewport slightly overshooting the antimeridian on the west edge.
    let viewport = RawViewport {
        south: 10.0,
        north: 20.0,
        west: 181.0,
        east: -170.0,
    };
    let bounds = normalize_viewport(&viewport).unwrap();
    assert!((bounds.min_lon - (-179.0)).abs() < 1e-9);

    // Three spots inside the wrapped box, centroid at (15, -174.5).
    let repo = Arc::new(LocalRepository::with_spots(vec![
        spot(1, 19.0, -171.0),
        spot(2, 15.0, -174.5),
        spot(3, 16.0, -174.0),
        spot(4, 50.0, 0.0),
    ])) as Arc<dyn SpotRepository>;
    let api = Arc::new(ServiceApi { repo });

    let loader = SpotLoader::new(
        api,
        SpotsQueryKey {
            bounds: Some(bounds),
            search: String::new(),
            limit: 2,
        },
    );

    assert!(loader.load_more().await.unwrap());
    let ids: Vec<i64> = loader.spots().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(loader.has_more());

    assert!(loader.load_more().await.unwrap());
    let ids: Vec<i64> = loader.spots().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert!(!loader.has_more());
    assert_eq!(loader.total(), Some(3));
}

#[tokio::test]
async fn test_world_wrap_viewport_loads_everything() {
    let viewport = RawViewport {
        south: -90.0,
        north: 90.0,
        west: -200.0,
        east: 200.0,
    };
    assert!(normalize_viewport(&viewport).is_none());

    let repo = Arc::new(LocalRepository::with_spots(vec![
        spot(1, 0.0, 0.0),
        spot(2, 50.0, 120.0),
    ])) as Arc<dyn SpotRepository>;
    let api = Arc::new(ServiceApi { repo });

    // A world-wrap viewport means no geographic filter at all.
    let loader = SpotLoader::new(
        api,
        SpotsQueryKey {
            bounds: None,
            search: String::new(),
            limit: 10,
        },
    );
    loader.load_more().await.unwrap();
    assert_eq!(loader.spots().len(), 2);
}

#[tokio::test]
async fn test_antimeridian_crossing_viewport_loads_both_sides() {
    // West of the antimeridian, east past it; the wrapped edges invert, so
    // the filter is dropped instead of matching nothing.
    let viewport = RawViewport {
        south: -10.0,
        north: 10.0,
        west: 170.0,
        east: 190.0,
    };
    assert!(normalize_viewport(&viewport).is_none());

    let repo = Arc::new(LocalRepository::with_spots(vec![
        spot(1, 0.0, 175.0),
        spot(2, 0.0, -175.0),
    ])) as Arc<dyn SpotRepository>;
    let api = Arc::new(ServiceApi { repo });

    let loader = SpotLoader::new(
        api,
        SpotsQueryKey {
            bounds: None,
            search: String::new(),
            limit: 10,
        },
    );
    loader.load_more().await.unwrap();
    let ids: Vec<i64> = loader.spots().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_normalized_bounds_survive_url_round_trip() {
    let viewport = RawViewport {
        south: 10.123456,
        north: 20.654321,
        west: 185.0,
        east: 190.0,
    };
    let bounds = normalize_viewport(&viewport).unwrap();

    let state = UrlState {
        bounds: Some(bounds),
        ..Default::default()
    };
    let restored = UrlState::decode(&state.encode()).bounds.unwrap();
    assert!((restored.min_lat - 10.123456).abs() < 1e-6);
    assert!((restored.min_lon - (-175.0)).abs() < 1e-6);
    assert!((restored.max_lon - (-170.0)).abs() < 1e-6);
}
