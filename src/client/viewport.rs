//! Viewport bounds normalization.
//!
//! Converts a raw map-reported extent into a canonical, antimeridian-safe
//! bounding box, or signals "unbounded" when the viewport spans the whole
//! world. Unbounded means "fetch without a geographic filter", never "fetch
//! nothing".

use crate::models::bounds::{BoundingBox, LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};

/// Raw extent as reported by the map widget. Longitudes may run outside
/// [-180, 180] when the user pans across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawViewport {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// Wrap a longitude into [-180, 180).
///
/// Robust to negative inputs and idempotent; non-finite values are treated
/// as 0.
pub fn normalize_lon(lon: f64) -> f64 {
    if !lon.is_finite() {
        return 0.0;
    }
    // In-range values pass through untouched; the modular arithmetic below
    // is not drift-free for them.
    if (LON_MIN..LON_MAX).contains(&lon) {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Clamp a latitude into [-90, 90]; non-finite values are treated as 0.
pub fn clamp_lat(lat: f64) -> f64 {
    if !lat.is_finite() {
        return 0.0;
    }
    lat.clamp(LAT_MIN, LAT_MAX)
}

/// Compute canonical bounds from a raw map extent.
///
/// Returns `None` when the viewport cannot be expressed as a single lat/lon
/// rectangle: an east-west span of a full world width or more (the viewport
/// wraps the globe), or a viewport straddling the antimeridian, whose wrapped
/// edges invert. `None` means "no geographic filter", never "fetch nothing".
pub fn normalize_viewport(raw: &RawViewport) -> Option<BoundingBox> {
    let west = if raw.west.is_finite() { raw.west } else { 0.0 };
    let east = if raw.east.is_finite() { raw.east } else { 0.0 };

    // Span is measured on the unwrapped extent; wrapping first would fold a
    // whole-world view into a sliver.
    if east - west >= 360.0 {
        return None;
    }

    let min_lon = normalize_lon(west);
    let mut max_lon = normalize_lon(east);

    // An east edge at exactly +180 wraps to -180; it still means the
    // antimeridian itself, not an inverted box.
    if max_lon == LON_MIN && min_lon > max_lon {
        max_lon = LON_MAX;
    }

    // A viewport straddling the antimeridian wraps to min_lon > max_lon,
    // which no single rectangle can express. Drop the filter rather than
    // produce a box that matches nothing.
    if min_lon > max_lon {
        return None;
    }

    Some(BoundingBox::new(
        clamp_lat(raw.south),
        clamp_lat(raw.north),
        min_lon,
        max_lon,
    ))
}
