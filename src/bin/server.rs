//! Spot Atlas HTTP Server Binary
//!
//! Main entry point for the spot directory REST API. It initializes the
//! repository, wires up the rate limiter and its sweeper task, builds the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin spots-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RATE_LIMIT`: Requests allowed per window (default: 100)
//! - `RATE_LIMIT_WINDOW_MS`: Window length in milliseconds (default: 60000)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS allowlist
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use spot_atlas::config::ServerConfig;
use spot_atlas::db;
use spot_atlas::http::{create_router, AppState};
use spot_atlas::services::RateLimiter;

/// How often expired rate-limit windows are reclaimed.
const SWEEP_PERIOD: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Spot Atlas HTTP Server");

    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let rate_limiter = RateLimiter::new(config.rate_limit, config.rate_limit_window_ms);
    let _sweeper = rate_limiter.spawn_sweeper(SWEEP_PERIOD);

    // Create application state
    let state = AppState::new(repository, rate_limiter);

    // Create router with all endpoints
    let app = create_router(state, config.allowed_origins.clone());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
