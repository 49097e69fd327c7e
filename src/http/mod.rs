//! Axum-based HTTP server.
//!
//! Everything under this module is gated behind the `http-server` feature.

pub mod cors;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
