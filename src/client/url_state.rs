//! URL-state serialization for back/forward navigation.
//!
//! Encodes the application state (viewport bounds, search text, filter flags,
//! selection) into a query string and back, so reloading or sharing a URL
//! restores the view. This is a navigation snapshot, not authoritative data;
//! it round-trips losslessly for the fields it carries (bounds at 6-decimal
//! fixed precision, boolean filters presence-encoded).

use crate::models::BoundingBox;

/// Quick-filter flags, presence-encoded in the URL (`"1"` when true).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub has_bars: bool,
    pub has_rings: bool,
    pub has_track: bool,
}

/// Serializable projection of the navigable application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlState {
    pub bounds: Option<BoundingBox>,
    pub search_query: String,
    pub filters: FilterOptions,
    pub selected_spot_id: Option<i64>,
}

impl UrlState {
    /// Serialize to a query string (without the leading `?`).
    pub fn encode(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(bounds) = &self.bounds {
            params.push(format!("minLat={:.6}", bounds.min_lat));
            params.push(format!("maxLat={:.6}", bounds.max_lat));
            params.push(format!("minLon={:.6}", bounds.min_lon));
            params.push(format!("maxLon={:.6}", bounds.max_lon));
        }

        if !self.search_query.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.search_query)));
        }

        if self.filters.has_bars {
            params.push("bars=1".to_string());
        }
        if self.filters.has_rings {
            params.push("rings=1".to_string());
        }
        if self.filters.has_track {
            params.push("track=1".to_string());
        }

        if let Some(id) = self.selected_spot_id {
            params.push(format!("spot={}", id));
        }

        params.join("&")
    }

    /// Parse a query string (with or without the leading `?`).
    ///
    /// Absent parameters decode to their defaults: `false` filters, no
    /// bounds, no selection, empty search. Bounds are only restored from a
    /// complete quartet.
    pub fn decode(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();

        let mut min_lat = None;
        let mut max_lat = None;
        let mut min_lon = None;
        let mut max_lon = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = kv.next().unwrap_or("");
            match key {
                "minLat" => min_lat = value.parse().ok(),
                "maxLat" => max_lat = value.parse().ok(),
                "minLon" => min_lon = value.parse().ok(),
                "maxLon" => max_lon = value.parse().ok(),
                "q" => state.search_query = decode_query_value(value),
                "bars" => state.filters.has_bars = value == "1",
                "rings" => state.filters.has_rings = value == "1",
                "track" => state.filters.has_track = value == "1",
                "spot" => state.selected_spot_id = value.parse().ok(),
                _ => {}
            }
        }

        if let (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) =
            (min_lat, max_lat, min_lon, max_lon)
        {
            state.bounds = Some(BoundingBox::new(min_lat, max_lat, min_lon, max_lon));
        }

        state
    }
}

/// Percent-decode a query-string value. `+` means space in query strings;
/// undecodable input is kept verbatim rather than dropped.
fn decode_query_value(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}
