//! Geographic bounding boxes.
//!
//! A `BoundingBox` is a rectangular lat/lon region used as a geographic
//! filter. Latitude/longitude range checks live here so the request validator
//! and the client-side viewport normalizer agree on what "valid" means.

use serde::{Deserialize, Serialize};

/// Latitude range in WGS-84 degrees.
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;

/// Longitude range in WGS-84 degrees.
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Rectangular lat/lon region, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Whether a position falls inside the box (inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Box midpoint, the reference point for in-viewport distance ranking.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Planar squared distance from the box centroid.
    ///
    /// Intentionally unscaled and non-spherical: this ranks records within a
    /// viewport, where the error is tolerable, and is part of the
    /// client-visible ordering contract. True distance is computed client-side
    /// for display only.
    pub fn sq_distance_from_centroid(&self, lat: f64, lon: f64) -> f64 {
        let (c_lat, c_lon) = self.centroid();
        (lat - c_lat) * (lat - c_lat) + (lon - c_lon) * (lon - c_lon)
    }
}

/// Whether a value is a latitude in [-90, 90].
pub fn is_valid_lat(lat: f64) -> bool {
    lat.is_finite() && (LAT_MIN..=LAT_MAX).contains(&lat)
}

/// Whether a value is a longitude in [-180, 180].
pub fn is_valid_lon(lon: f64) -> bool {
    lon.is_finite() && (LON_MIN..=LON_MAX).contains(&lon)
}
