//! Geo Lookup
//!
//! Geographic lookups over a reference dataset of location records:
//! - Keyword, postal code and state code search
//! - Flat-earth proximity search around a coordinate
//! - Cache-aside layer over an in-memory or Redis cache
//! - In-memory or PostgreSQL record store

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::cache::CacheFactory;
use infrastructure::location::LocationRepositoryFactory;
use infrastructure::services::{CachedLookupService, LookupService};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let lookup = create_lookup_service(config).await?;

    let repository = lookup.inner().repository().clone();
    let cache = lookup.cache().clone();

    Ok(AppState::new(Arc::new(lookup), repository, cache))
}

/// Wire the record store, cache and lookup services from configuration
pub async fn create_lookup_service(
    config: &AppConfig,
) -> anyhow::Result<CachedLookupService<LookupService>> {
    info!("Storage backend: {:?}", config.storage.backend);
    let repository = LocationRepositoryFactory::create(&config.storage).await?;

    info!("Cache backend: {}", config.cache.backend);
    let cache = CacheFactory::new().create(&config.cache).await?;

    let lookup = LookupService::with_config(repository, config.lookup.clone());

    Ok(CachedLookupService::new(lookup, cache)
        .with_operation_timeout(config.cache.operation_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_defaults() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.cache.backend_name(), "in_memory");
        assert_eq!(state.repository.count().await.unwrap(), 0);

        let result = state.lookup.zipcode_lookup(62701).await.unwrap();
        assert!(result.success);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_create_app_state_with_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"lat":39.78,"lng":-89.65,"city":"Springfield","countyName":"Sangamon",
                 "stateName":"Illinois","stateCode":"IL","zip":62701}]"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.storage.dataset_path = Some(path.to_string_lossy().into_owned());

        let state = create_app_state_with_config(&config).await.unwrap();
        let result = state.lookup.keyword_lookup("Springfield").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(
            state.lookup.state_by_zip(62701).await.unwrap().as_deref(),
            Some("Illinois")
        );
    }
}
