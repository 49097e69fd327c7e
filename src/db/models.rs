//! Raw storage rows and row shaping.
//!
//! [`SpotRow`] mirrors the stored table shape: nullable scalar columns plus
//! JSON-encoded text columns for the list-valued fields. Shaping a row into
//! the public [`Spot`] format parses those columns defensively: a malformed
//! stored value degrades to "field absent" and is logged once per offending
//! record as a data-quality event, never failing the whole page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{Spot, SpotDetails, SpotFeatures};

/// One stored spot record, as read from the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRow {
    pub id: i64,
    pub title: String,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,
    /// JSON-encoded array of equipment tags.
    pub equipment: Option<String>,
    /// JSON-encoded array of discipline tags.
    pub disciplines: Option<String>,
    pub description: Option<String>,
    pub features_type: Option<String>,
    /// JSON-encoded array of image URLs.
    pub images: Option<String>,
    pub rating: Option<f64>,
}

impl SpotRow {
    /// Shape the raw row into the public record format.
    pub fn into_spot(self) -> Spot {
        let mut corrupt_fields: Vec<&'static str> = Vec::new();

        let equipment = parse_json_or_default::<Vec<String>>(
            self.equipment.as_deref(),
            "equipment",
            &mut corrupt_fields,
        )
        .map(clean_tags)
        .filter(|tags| !tags.is_empty());
        let disciplines = parse_json_or_default::<Vec<String>>(
            self.disciplines.as_deref(),
            "disciplines",
            &mut corrupt_fields,
        )
        .map(clean_tags)
        .filter(|tags| !tags.is_empty());
        let images = parse_json_or_default::<Vec<String>>(
            self.images.as_deref(),
            "images",
            &mut corrupt_fields,
        );

        if !corrupt_fields.is_empty() {
            tracing::warn!(
                spot_id = self.id,
                fields = ?corrupt_fields,
                "malformed stored JSON, dropping fields"
            );
        }

        let details = SpotDetails {
            equipment,
            disciplines,
            description: self.description,
            features: self.features_type.map(|kind| SpotFeatures { kind }),
            images,
            rating: self.rating,
        };

        Spot {
            id: self.id,
            title: self.title,
            name: self.name,
            lat: self.lat,
            lon: self.lon,
            address: self.address,
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
        }
    }
}

/// Parse an optionally-encoded JSON column, degrading to `None` on failure.
///
/// Used uniformly for every JSON text column; the caller aggregates failures
/// so the record is logged once, not once per field.
fn parse_json_or_default<T: DeserializeOwned>(
    raw: Option<&str>,
    field: &'static str,
    corrupt_fields: &mut Vec<&'static str>,
) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(_) => {
            corrupt_fields.push(field);
            None
        }
    }
}

/// Drop empty strings and duplicates, preserving first-seen order.
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|t| !t.trim().is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SpotRow {
        SpotRow {
            id: 1,
            title: "Bars Park".to_string(),
            name: Some("North Entrance".to_string()),
            lat: Some(52.52),
            lon: Some(13.40),
            address: Some("123 Bar Street".to_string()),
            equipment: Some(r#"["pull-up bar","rings","","pull-up bar"]"#.to_string()),
            disciplines: Some(r#"["calisthenics"]"#.to_string()),
            description: Some("Outdoor gym".to_string()),
            features_type: Some("park".to_string()),
            images: Some(r#"["https://cdn.example/1.jpg"]"#.to_string()),
            rating: Some(4.5),
        }
    }

    #[test]
    fn test_shaping_full_row() {
        let spot = row().into_spot();
        let details = spot.details.unwrap();
        assert_eq!(
            details.equipment.unwrap(),
            vec!["pull-up bar".to_string(), "rings".to_string()]
        );
        assert_eq!(details.features.unwrap().kind, "park");
        assert_eq!(details.rating, Some(4.5));
    }

    #[test]
    fn test_malformed_json_degrades_to_absent() {
        let mut r = row();
        r.equipment = Some("{not json".to_string());
        r.images = Some("[\"unterminated".to_string());
        let spot = r.into_spot();
        let details = spot.details.unwrap();
        assert!(details.equipment.is_none());
        assert!(details.images.is_none());
        // The rest of the record survives.
        assert_eq!(details.disciplines.unwrap(), vec!["calisthenics"]);
    }

    #[test]
    fn test_empty_details_dropped() {
        let r = SpotRow {
            id: 2,
            title: "Minimal".to_string(),
            name: None,
            lat: None,
            lon: None,
            address: None,
            equipment: None,
            disciplines: None,
            description: None,
            features_type: None,
            images: None,
            rating: None,
        };
        let spot = r.into_spot();
        assert!(spot.details.is_none());
    }

    #[test]
    fn test_empty_tag_list_treated_as_absent() {
        let mut r = row();
        r.equipment = Some(r#"["", "  "]"#.to_string());
        let spot = r.into_spot();
        assert!(spot.details.unwrap().equipment.is_none());
    }
}
