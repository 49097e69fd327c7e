//! Public record types served to clients.
//!
//! These are the wire shapes of the REST API: the spot record itself and the
//! paged response envelope. Field names follow the JSON contract consumed by
//! the map frontend (camelCase where the wire format requires it).

use serde::{Deserialize, Serialize};

/// A single point of interest as served to clients.
///
/// `lat` and `lon` are WGS-84 degrees and are either both present or both
/// absent; records without coordinates exist (address-only entries) and are
/// excluded by any geographic filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Unique, stable identifier.
    pub id: i64,
    /// Primary display string (non-empty).
    pub title: String,
    /// Optional secondary label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<SpotDetails>,
}

/// Optional detail block attached to a spot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotDetails {
    /// Free-text equipment tags, deduplicated, empty strings excluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    /// Free-text discipline tags, same shape as `equipment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disciplines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<SpotFeatures>,
    /// Ordered list of image asset URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Bounded numeric score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Single categorical feature tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotFeatures {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Pagination envelope carried alongside each page of spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub limit: u32,
    pub offset: u32,
    /// Whether another page exists past this one (limit+1 probe, not a count).
    pub has_more: bool,
    /// Total eligible records under the same predicate, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// One page of the query endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotsPage {
    pub spots: Vec<Spot>,
    pub pagination: PaginationInfo,
}

impl SpotDetails {
    /// True when every field is absent; used to drop empty detail blocks
    /// instead of serializing `"details": {}`.
    pub fn is_empty(&self) -> bool {
        self.equipment.is_none()
            && self.disciplines.is_none()
            && self.description.is_none()
            && self.features.is_none()
            && self.images.is_none()
            && self.rating.is_none()
    }
}
