//! # Spot Atlas Backend
//!
//! Query/pagination/viewport-sync engine for a location directory service.
//!
//! This crate serves geographically-bounded, searchable, paginated listings of
//! points of interest ("spots") to a map-centric client, and provides the
//! client-side logic that keeps the map viewport, search text, filters, and
//! selection synchronized with a shareable URL.
//!
//! ## Features
//!
//! - **Query endpoint**: bounding-box + substring filtering with offset-based
//!   pagination over a point-record store
//! - **Rate limiting**: fixed-window counter keyed by client identifier
//! - **CORS gating**: origin allowlist with a permissive localhost rule
//! - **Viewport reconciliation**: antimeridian-safe bounds normalization,
//!   debounced refetch triggering, and URL-state round-tripping
//!
//! ## Architecture
//!
//! - [`api`]: public record types (DTOs) for API responses
//! - [`models`]: filter criteria, bounding boxes, and request validation
//! - [`db`]: repository pattern and persistence layer
//! - [`services`]: rate limiting and the spot query service
//! - [`http`]: axum-based HTTP server and request handlers
//! - [`client`]: client-side viewport sync, incremental loading, URL state

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
