//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::LookupOperation;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("geo_lookup_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router mounted at `path`
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

pub fn record_cache_hit(operation: LookupOperation) {
    counter!("geo_lookup_cache_hits_total", "operation" => operation.as_str()).increment(1);
}

pub fn record_cache_miss(operation: LookupOperation) {
    counter!("geo_lookup_cache_misses_total", "operation" => operation.as_str()).increment(1);
}

/// Counts cache faults (outage, timeout, malformed entry); the lookup still proceeds
pub fn record_cache_error(operation: LookupOperation) {
    counter!("geo_lookup_cache_errors_total", "operation" => operation.as_str()).increment(1);
}

/// Record a store-backed lookup
pub fn record_lookup(operation: LookupOperation, duration: Duration, success: bool) {
    let labels = [
        ("operation", operation.as_str().to_string()),
        ("status", if success { "success" } else { "error" }.to_string()),
    ];

    counter!("geo_lookup_requests_total", &labels).increment(1);
    histogram!("geo_lookup_duration_seconds", &labels).record(duration.as_secs_f64());
}
