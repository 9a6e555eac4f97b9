//! Health, readiness and liveness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;
use crate::domain::DomainError;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Outcome of checking one dependency
#[derive(Serialize, Debug)]
pub struct DependencyCheck {
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub latency_ms: u64,
}

impl DependencyCheck {
    fn from_outcome(
        name: String,
        started: Instant,
        outcome: Result<Option<String>, DomainError>,
    ) -> Self {
        let latency_ms = started.elapsed().as_millis() as u64;
        let (ok, detail) = match outcome {
            Ok(detail) => (true, detail),
            Err(e) => (false, Some(e.to_string())),
        };

        Self {
            name,
            ok,
            detail,
            latency_ms,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<DependencyCheck>,
}

impl HealthResponse {
    /// The record store decides readiness; a cache fault only degrades it
    fn from_checks(store: DependencyCheck, cache: DependencyCheck) -> Self {
        let status = match (store.ok, cache.ok) {
            (false, _) => HealthStatus::Unhealthy,
            (true, false) => HealthStatus::Degraded,
            (true, true) => HealthStatus::Healthy,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: vec![store, cache],
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        }
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        checks: Vec::new(),
    })
}

pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let store = DependencyCheck::from_outcome(
        "record_store".to_string(),
        started,
        state
            .repository
            .count()
            .await
            .map(|count| Some(format!("{} records", count))),
    );

    let started = Instant::now();
    let cache = DependencyCheck::from_outcome(
        format!("cache:{}", state.cache.backend_name()),
        started,
        state.cache.get_raw("__health_probe").await.map(|_| None),
    );

    let response = HealthResponse::from_checks(store, cache);
    (response.status_code(), Json(response))
}

pub async fn live_check() -> StatusCode {
    StatusCode::OK
}
