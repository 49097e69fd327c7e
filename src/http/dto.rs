//! Data Transfer Objects for the HTTP API.
//!
//! The response record types live in [`crate::api`] and are re-exported here;
//! the raw query struct lives with the validator in [`crate::models`] so the
//! validation rules stay next to the types they produce.

use serde::{Deserialize, Serialize};

pub use crate::api::{PaginationInfo, Spot, SpotDetails, SpotFeatures, SpotsPage};
pub use crate::models::{FieldViolation, RawSpotsQuery};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Record store status
    pub store: String,
}
