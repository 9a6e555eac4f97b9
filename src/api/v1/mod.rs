//! v1 API endpoints

pub mod geocode;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/geocode/keyword/{keyword}", get(geocode::keyword_lookup))
        .route("/geocode/zip/{zip}", get(geocode::zipcode_lookup))
        .route("/geocode/zip/{zip}/state", get(geocode::state_by_zip))
        .route("/geocode/state/{code}", get(geocode::statecode_lookup))
        .route("/geocode/point", get(geocode::point_lookup))
        .route("/geocode/states", get(geocode::list_states))
        .route("/geocode/all", get(geocode::all_locations))
}
