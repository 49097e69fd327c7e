//! HTTP error handling and response types.
//!
//! Maps the error taxonomy onto HTTP statuses: validation failures become 400
//! with the full violation list, rate-limit denials become 429 with
//! machine-readable retry timing, and upstream store failures become a
//! generic 500 that never leaks query internals.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::FieldViolation;
use crate::services::RateLimitDecision;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level violations for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<FieldViolation>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            violations: None,
        }
    }

    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = Some(violations);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request parameters; carries every violation found.
    Validation(Vec<FieldViolation>),
    /// Request denied by the rate limiter.
    RateLimited {
        limit: u32,
        decision: RateLimitDecision,
    },
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(
                    ApiError::new("VALIDATION_ERROR", "Invalid request parameters")
                        .with_violations(violations),
                ),
            )
                .into_response(),
            AppError::RateLimited { limit, decision } => {
                rate_limited_response(limit, decision)
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ApiError::new("NOT_FOUND", msg)),
            )
                .into_response(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                generic_failure()
            }
            AppError::Repository(e) => {
                if matches!(e, RepositoryError::NotFound { .. }) {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(ApiError::new("NOT_FOUND", "Record not found")),
                    )
                        .into_response();
                }
                // Log with context, surface nothing internal to the caller.
                tracing::error!(error = %e, retryable = e.is_retryable(), "repository error");
                generic_failure()
            }
        }
    }
}

/// 429 with `Retry-After` and `X-RateLimit-*` headers.
fn rate_limited_response(limit: u32, decision: RateLimitDecision) -> Response {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let retry_after_secs = ((decision.reset_time - now_ms).max(0) + 999) / 1000;

    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ApiError::new("RATE_LIMITED", "Too many requests")),
    )
        .into_response();

    let headers = response.headers_mut();
    insert_numeric(headers, "Retry-After", retry_after_secs);
    insert_numeric(headers, "X-RateLimit-Limit", i64::from(limit));
    insert_numeric(headers, "X-RateLimit-Remaining", i64::from(decision.remaining));
    insert_numeric(headers, "X-RateLimit-Reset", decision.reset_time);
    response
}

fn insert_numeric(headers: &mut axum::http::HeaderMap, name: &'static str, value: i64) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(name, value);
    }
}

fn generic_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("INTERNAL_ERROR", "Failed to load spots")),
    )
        .into_response()
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
