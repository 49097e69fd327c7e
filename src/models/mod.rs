//! Domain model types: bounding boxes and validated filter criteria.

pub mod bounds;
pub mod criteria;

pub use bounds::BoundingBox;
pub use criteria::{FieldViolation, FilterCriteria, RawSpotsQuery};
