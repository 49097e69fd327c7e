//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS gate, compression, tracing) and
//! creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use super::cors;
use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// `allowed_origins` is the CORS allowlist; localhost origins are always
/// accepted for development.
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let api = Router::new()
        .route("/spots", get(handlers::list_spots))
        .route("/spots/{id}", get(handlers::get_spot));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors::cors_layer(allowed_origins))
        .with_state(state)
}
