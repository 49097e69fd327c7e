//! Server configuration from environment variables.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Requests allowed per rate-limit window
    pub rate_limit: u32,
    /// Rate-limit window length in milliseconds
    pub rate_limit_window_ms: i64,
    /// Origins allowed by the CORS gate, beyond the localhost development rule
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            rate_limit: 100,
            rate_limit_window_ms: 60_000,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0): bind host
    /// - `PORT` (optional, default: 8080): bind port
    /// - `RATE_LIMIT` (optional, default: 100): requests per window
    /// - `RATE_LIMIT_WINDOW_MS` (optional, default: 60000): window length
    /// - `ALLOWED_ORIGINS` (optional): comma-separated CORS allowlist
    ///
    /// # Errors
    /// Returns an error if a variable is set but not parseable; invalid
    /// values are never silently replaced with defaults.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT", defaults.port)?;
        let rate_limit = parse_var("RATE_LIMIT", defaults.rate_limit)?;
        let rate_limit_window_ms =
            parse_var("RATE_LIMIT_WINDOW_MS", defaults.rate_limit_window_ms)?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            rate_limit,
            rate_limit_window_ms,
            allowed_origins,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("Invalid value for {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
