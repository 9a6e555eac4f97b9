//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Expiry applied to every entry written
    pub default_ttl: Duration,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            default_ttl: Duration::from_secs(3600),
            key_prefix: None,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCacheConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    fn ttl_secs(&self) -> u64 {
        self.default_ttl.as_secs().max(1)
    }
}

/// Redis cache backed by a multiplexed `ConnectionManager`
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    /// Creates a new Redis cache connection
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            DomainError::configuration(format!("Invalid Redis URL '{}': {}", config.url, e))
        })?;

        let connection =
            tokio::time::timeout(config.connection_timeout, ConnectionManager::new(client))
                .await
                .map_err(|_| DomainError::cache_unavailable("Timed out connecting to Redis"))?
                .map_err(|e| {
                    DomainError::cache_unavailable(format!("Failed to connect to Redis: {}", e))
                })?;

        Ok(Self { connection, config })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<String> = conn.get(&prefixed_key).await.map_err(|e| {
            DomainError::cache_unavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let _: () = conn
            .set_ex(&prefixed_key, value, self.config.ttl_secs())
            .await
            .map_err(|e| {
                DomainError::cache_unavailable(format!("Failed to set key '{}': {}", key, e))
            })?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests require a running Redis instance
    // Run with: cargo test -- --ignored

    fn get_test_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:6379")
            .with_key_prefix("geo-lookup-test")
            .with_default_ttl(Duration::from_secs(60))
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get() {
        let cache = RedisCache::new(get_test_config()).await.unwrap();

        cache.set_raw("ZipcodeLookup_62701", "{}").await.unwrap();

        let result = cache.get_raw("ZipcodeLookup_62701").await.unwrap();
        assert_eq!(result, Some("{}".to_string()));
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_get_missing() {
        let cache = RedisCache::new(get_test_config()).await.unwrap();

        let result = cache.get_raw("definitely-not-there").await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_key_prefix() {
        let config = RedisCacheConfig::new("redis://localhost").with_key_prefix("geo");
        assert_eq!(config.prefix_key("GetStates"), "geo:GetStates");

        let bare = RedisCacheConfig::new("redis://localhost");
        assert_eq!(bare.prefix_key("GetStates"), "GetStates");
    }

    #[test]
    fn test_ttl_is_at_least_one_second() {
        let config =
            RedisCacheConfig::new("redis://localhost").with_default_ttl(Duration::from_millis(10));
        assert_eq!(config.ttl_secs(), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_is_configuration_error() {
        let result = RedisCache::new(RedisCacheConfig::new("not a url")).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
