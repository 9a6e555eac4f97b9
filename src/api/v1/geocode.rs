//! Geocode endpoint handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, PointParams, StateByZipResponse};
use crate::domain::{LookupResult, StateSummary};

/// Rejects non-numeric postal codes instead of coercing them
fn parse_zip(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("zip must be numeric, got '{}'", raw)))
}

/// GET /v1/geocode/keyword/{keyword}
pub async fn keyword_lookup(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<LookupResult>, ApiError> {
    debug!(keyword = %keyword, "Keyword lookup");

    let result = state.lookup.keyword_lookup(&keyword).await?;
    Ok(Json(result))
}

/// GET /v1/geocode/zip/{zip}
pub async fn zipcode_lookup(
    State(state): State<AppState>,
    Path(zip): Path<String>,
) -> Result<Json<LookupResult>, ApiError> {
    let zip = parse_zip(&zip)?;
    debug!(zip, "Zipcode lookup");

    let result = state.lookup.zipcode_lookup(zip).await?;
    Ok(Json(result))
}

/// GET /v1/geocode/state/{code}
pub async fn statecode_lookup(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LookupResult>, ApiError> {
    debug!(state_code = %code, "State code lookup");

    let result = state.lookup.statecode_lookup(&code).await?;
    Ok(Json(result))
}

/// GET /v1/geocode/point?lat=&lng=&radius=&limit=
pub async fn point_lookup(
    State(state): State<AppState>,
    params: Result<Query<PointParams>, QueryRejection>,
) -> Result<Json<LookupResult>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    debug!(?params, "Point lookup");

    let mut query = state.lookup.default_point_query(params.lat, params.lng);
    if let Some(radius) = params.radius {
        query = query.with_radius(radius);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    let result = state.lookup.point_lookup(query).await?;
    Ok(Json(result))
}

/// GET /v1/geocode/zip/{zip}/state
pub async fn state_by_zip(
    State(state): State<AppState>,
    Path(zip): Path<String>,
) -> Result<Json<StateByZipResponse>, ApiError> {
    let zip = parse_zip(&zip)?;
    debug!(zip, "State by zip lookup");

    let state_name = state.lookup.state_by_zip(zip).await?;
    Ok(Json(StateByZipResponse { zip, state_name }))
}

/// GET /v1/geocode/states
pub async fn list_states(
    State(state): State<AppState>,
) -> Result<Json<Vec<StateSummary>>, ApiError> {
    debug!("Listing states");

    let states = state.lookup.states().await?;
    Ok(Json(states))
}

/// GET /v1/geocode/all
///
/// Unbounded dump of the whole dataset.
pub async fn all_locations(
    State(state): State<AppState>,
) -> Result<Json<LookupResult>, ApiError> {
    debug!("Dumping all locations");

    let result = state.lookup.all_locations().await?;
    Ok(Json(result))
}
