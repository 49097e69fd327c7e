//! Request parameter validation.
//!
//! Turns raw, untyped query parameters into typed [`FilterCriteria`], or a
//! structured list of field-level violations. All violations are collected in
//! a single pass so a client sees every problem at once.

use serde::{Deserialize, Serialize};

use super::bounds::{self, BoundingBox};

/// Default page size when `limit` is absent.
pub const DEFAULT_LIMIT: u32 = 100;
/// Hard cap on page size; numeric input is clamped into [1, MAX_LIMIT].
pub const MAX_LIMIT: u32 = 500;
/// Maximum accepted length of the search term.
pub const MAX_SEARCH_LEN: usize = 200;

/// Raw query parameters as received on the wire (everything optional,
/// everything a string).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSpotsQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "minLat")]
    pub min_lat: Option<String>,
    #[serde(default, rename = "maxLat")]
    pub max_lat: Option<String>,
    #[serde(default, rename = "minLon")]
    pub min_lon: Option<String>,
    #[serde(default, rename = "maxLon")]
    pub max_lon: Option<String>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validated, typed representation of a query request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            search: None,
            bounds: None,
        }
    }
}

impl FilterCriteria {
    /// Validate raw request parameters into typed criteria.
    ///
    /// Returns every violation found, not just the first. `limit` is the one
    /// field with a sanctioned clamp: numeric input is forced into
    /// [1, [`MAX_LIMIT`]]; everything else is rejected when out of range. A
    /// bounding box is applied only when the full quartet is present and
    /// valid; an incomplete quartet is ignored as if absent.
    pub fn from_raw(raw: &RawSpotsQuery) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let limit = match raw.limit.as_deref() {
            None | Some("") => DEFAULT_LIMIT,
            Some(s) => match s.parse::<i64>() {
                Ok(n) => (n.max(1).min(i64::from(MAX_LIMIT))) as u32,
                Err(_) => {
                    violations.push(FieldViolation::new("limit", "must be an integer"));
                    DEFAULT_LIMIT
                }
            },
        };

        let offset = match raw.offset.as_deref() {
            None | Some("") => 0,
            Some(s) => match s.parse::<i64>() {
                Ok(n) if n < 0 => {
                    violations.push(FieldViolation::new("offset", "must be >= 0"));
                    0
                }
                Ok(n) => match u32::try_from(n) {
                    Ok(n) => n,
                    Err(_) => {
                        violations.push(FieldViolation::new(
                            "offset",
                            format!("must be at most {}", u32::MAX),
                        ));
                        0
                    }
                },
                Err(_) => {
                    violations.push(FieldViolation::new("offset", "must be an integer"));
                    0
                }
            },
        };

        let search = match raw.search.as_deref() {
            None | Some("") => None,
            Some(s) if s.chars().count() > MAX_SEARCH_LEN => {
                violations.push(FieldViolation::new(
                    "search",
                    format!("must be at most {} characters", MAX_SEARCH_LEN),
                ));
                None
            }
            Some(s) => Some(s.to_string()),
        };

        let min_lat = parse_coord(&mut violations, "minLat", raw.min_lat.as_deref(), true);
        let max_lat = parse_coord(&mut violations, "maxLat", raw.max_lat.as_deref(), true);
        let min_lon = parse_coord(&mut violations, "minLon", raw.min_lon.as_deref(), false);
        let max_lon = parse_coord(&mut violations, "maxLon", raw.max_lon.as_deref(), false);

        // The filter applies only as a complete quartet; partial bounds are
        // ignored as if absent.
        let bounds = match (min_lat, max_lat, min_lon, max_lon) {
            (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) => {
                Some(BoundingBox::new(min_lat, max_lat, min_lon, max_lon))
            }
            _ => None,
        };

        if violations.is_empty() {
            Ok(Self {
                limit,
                offset,
                search,
                bounds,
            })
        } else {
            Err(violations)
        }
    }
}

/// Parse one bounding-box coordinate; absent fields are fine, present fields
/// must be finite floats within the latitude or longitude range.
fn parse_coord(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&str>,
    is_lat: bool,
) -> Option<f64> {
    let s = match value {
        None | Some("") => return None,
        Some(s) => s,
    };
    match s.parse::<f64>() {
        Ok(v) if is_lat && bounds::is_valid_lat(v) => Some(v),
        Ok(v) if !is_lat && bounds::is_valid_lon(v) => Some(v),
        Ok(_) => {
            let range = if is_lat { "[-90, 90]" } else { "[-180, 180]" };
            violations.push(FieldViolation::new(field, format!("must be in {}", range)));
            None
        }
        Err(_) => {
            violations.push(FieldViolation::new(field, "must be a number"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawSpotsQuery {
        let mut q = RawSpotsQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "limit" => q.limit = v,
                "offset" => q.offset = v,
                "search" => q.search = v,
                "minLat" => q.min_lat = v,
                "maxLat" => q.max_lat = v,
                "minLon" => q.min_lon = v,
                "maxLon" => q.max_lon = v,
                other => panic!("unknown param {}", other),
            }
        }
        q
    }

    #[test]
    fn test_defaults_when_empty() {
        let criteria = FilterCriteria::from_raw(&RawSpotsQuery::default()).unwrap();
        assert_eq!(criteria.limit, DEFAULT_LIMIT);
        assert_eq!(criteria.offset, 0);
        assert!(criteria.search.is_none());
        assert!(criteria.bounds.is_none());
    }

    #[test]
    fn test_limit_is_clamped_not_rejected() {
        let criteria = FilterCriteria::from_raw(&raw(&[("limit", "9999")])).unwrap();
        assert_eq!(criteria.limit, MAX_LIMIT);
        let criteria = FilterCriteria::from_raw(&raw(&[("limit", "0")])).unwrap();
        assert_eq!(criteria.limit, 1);
    }

    #[test]
    fn test_non_numeric_limit_is_a_violation() {
        let err = FilterCriteria::from_raw(&raw(&[("limit", "abc")])).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "limit");
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = FilterCriteria::from_raw(&raw(&[("offset", "-5")])).unwrap_err();
        assert_eq!(err[0].field, "offset");
    }

    #[test]
    fn test_oversized_offset_rejected_not_truncated() {
        // u32::MAX + 1 would truncate to 0 under a blind cast.
        let err = FilterCriteria::from_raw(&raw(&[("offset", "4294967296")])).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "offset");

        let criteria = FilterCriteria::from_raw(&raw(&[("offset", "4294967295")])).unwrap();
        assert_eq!(criteria.offset, u32::MAX);
    }

    #[test]
    fn test_partial_bounds_ignored() {
        let criteria = FilterCriteria::from_raw(&raw(&[
            ("minLat", "10"),
            ("maxLat", "20"),
            ("minLon", "10"),
        ]))
        .unwrap();
        assert!(criteria.bounds.is_none());
    }

    #[test]
    fn test_full_bounds_accepted() {
        let criteria = FilterCriteria::from_raw(&raw(&[
            ("minLat", "10"),
            ("maxLat", "20"),
            ("minLon", "10"),
            ("maxLon", "20"),
        ]))
        .unwrap();
        let bbox = criteria.bounds.unwrap();
        assert_eq!(bbox.min_lat, 10.0);
        assert_eq!(bbox.max_lon, 20.0);
    }

    #[test]
    fn test_out_of_range_latitude_never_clamped() {
        let err = FilterCriteria::from_raw(&raw(&[
            ("minLat", "-95"),
            ("maxLat", "20"),
            ("minLon", "10"),
            ("maxLon", "20"),
        ]))
        .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].field, "minLat");
    }

    #[test]
    fn test_all_violations_reported_at_once() {
        let err = FilterCriteria::from_raw(&raw(&[
            ("limit", "x"),
            ("offset", "y"),
            ("minLon", "300"),
        ]))
        .unwrap_err();
        let fields: Vec<&str> = err.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["limit", "offset", "minLon"]);
    }

    #[test]
    fn test_search_length_limit() {
        let long = "x".repeat(MAX_SEARCH_LEN + 1);
        let err = FilterCriteria::from_raw(&raw(&[("search", &long)])).unwrap_err();
        assert_eq!(err[0].field, "search");

        let ok = "x".repeat(MAX_SEARCH_LEN);
        let criteria = FilterCriteria::from_raw(&raw(&[("search", &ok)])).unwrap();
        assert_eq!(criteria.search.unwrap().len(), MAX_SEARCH_LEN);
    }

    #[test]
    fn test_empty_search_treated_as_absent() {
        let criteria = FilterCriteria::from_raw(&raw(&[("search", "")])).unwrap();
        assert!(criteria.search.is_none());
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let err = FilterCriteria::from_raw(&raw(&[
            ("minLat", "NaN"),
            ("maxLat", "20"),
            ("minLon", "10"),
            ("maxLon", "20"),
        ]))
        .unwrap_err();
        assert_eq!(err[0].field, "minLat");
    }
}
