//! Record store factory for runtime backend selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::location::LocationRepository;
use crate::domain::DomainError;

use super::in_memory::InMemoryLocationRepository;
use super::postgres::{PostgresConfig, PostgresLocationRepository};

/// Supported record store types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageType {
    /// Dataset held in memory, optionally loaded from a JSON file
    #[default]
    InMemory,
    /// PostgreSQL `geo_data` table
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(DomainError::configuration(format!(
                "Unknown storage backend: {}. Valid backends: in_memory, postgres",
                s
            ))),
        }
    }
}

impl TryFrom<String> for StorageType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Record store settings (`[storage]` section)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageType,
    /// PostgreSQL URL; falls back to `DATABASE_URL`
    pub database_url: Option<String>,
    /// JSON dataset for the in-memory backend
    pub dataset_path: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageType::InMemory,
            database_url: None,
            dataset_path: None,
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

/// Factory for creating record store instances
#[derive(Debug)]
pub struct LocationRepositoryFactory;

impl LocationRepositoryFactory {
    pub async fn create(
        config: &StorageConfig,
    ) -> Result<Arc<dyn LocationRepository>, DomainError> {
        match config.backend {
            StorageType::InMemory => match &config.dataset_path {
                Some(path) => {
                    info!(path = %path, "Loading location dataset");
                    Ok(Arc::new(InMemoryLocationRepository::from_json_file(path).await?))
                }
                None => {
                    info!("No dataset configured, starting with an empty in-memory store");
                    Ok(Arc::new(InMemoryLocationRepository::new()))
                }
            },
            StorageType::Postgres => {
                let url = config
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        DomainError::configuration(
                            "storage.database_url or DATABASE_URL is required for postgres",
                        )
                    })?;

                let pg_config = PostgresConfig::new(url)
                    .with_max_connections(config.max_connections)
                    .with_connect_timeout(config.connect_timeout_secs);

                info!("Connecting to PostgreSQL...");
                let repository = PostgresLocationRepository::connect(&pg_config).await?;
                info!("PostgreSQL connection established");

                Ok(Arc::new(repository))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in_memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("PG".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!("sqlite".parse::<StorageType>().is_err());
    }

    #[tokio::test]
    async fn test_create_empty_in_memory() {
        let repository = LocationRepositoryFactory::create(&StorageConfig::default())
            .await
            .unwrap();

        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_in_memory_with_missing_dataset() {
        let config = StorageConfig {
            dataset_path: Some("/nonexistent/geo.json".to_string()),
            ..Default::default()
        };

        let result = LocationRepositoryFactory::create(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
