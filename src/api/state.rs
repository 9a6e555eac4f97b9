//! Application state for shared services

use std::sync::Arc;

use crate::domain::{Cache, GeoLookup, LocationRepository};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Cached lookup service answering the geocode endpoints
    pub lookup: Arc<dyn GeoLookup>,
    /// Record store, probed by the readiness check
    pub repository: Arc<dyn LocationRepository>,
    /// Cache backend, probed by the readiness check
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(
        lookup: Arc<dyn GeoLookup>,
        repository: Arc<dyn LocationRepository>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            lookup,
            repository,
            cache,
        }
    }
}
