//! HTTP handlers for the REST API.
//!
//! Each handler resolves the client identifier, passes the rate-limit gate,
//! validates parameters, and delegates to the service layer.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{HealthResponse, RawSpotsQuery};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::FilterCriteria;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Cache policy for successful query responses: the dataset changes
/// infrequently, so allow shared caches a short lifetime with
/// stale-while-revalidate.
const CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=300";

/// Sentinel bucket for requests whose source cannot be resolved.
const UNKNOWN_CLIENT: &str = "unknown";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => {
            tracing::error!(error = %e, "store health check failed");
            "error".to_string()
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
    }))
}

// =============================================================================
// Spot Queries
// =============================================================================

/// GET /api/spots
///
/// Filtered, paginated spot listing. Read-only and idempotent.
pub async fn list_spots(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<RawSpotsQuery>,
) -> Result<Response, AppError> {
    check_rate_limit(&state, &headers)?;

    let criteria = FilterCriteria::from_raw(&raw).map_err(AppError::Validation)?;

    let page = db_services::query_spots_page(state.repository.as_ref(), &criteria).await?;

    Ok((
        [(header::CACHE_CONTROL, CACHE_CONTROL)],
        Json(page),
    )
        .into_response())
}

/// GET /api/spots/{id}
pub async fn get_spot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    check_rate_limit(&state, &headers)?;

    let spot = db_services::get_spot(state.repository.as_ref(), id).await?;

    Ok((
        [(header::CACHE_CONTROL, CACHE_CONTROL)],
        Json(spot),
    )
        .into_response())
}

fn check_rate_limit(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let identifier = client_identifier(headers);
    let decision = state.rate_limiter.check(&identifier);
    if decision.allowed {
        Ok(())
    } else {
        tracing::warn!(client = %identifier, "rate limit exceeded");
        Err(AppError::RateLimited {
            limit: state.rate_limiter.limit(),
            decision,
        })
    }
}

/// Resolve the rate-limit bucket for a request: first forwarded-for address,
/// then the real-ip header, then the shared "unknown" bucket.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}
