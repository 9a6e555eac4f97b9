//! Cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Key-value string cache
///
/// Expiry and eviction belong to the backend's own configuration; callers
/// never pass a TTL. Only get and set are exposed: nothing here deletes or
/// invalidates entries.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw string value from the cache
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a raw string value
    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Short backend name for logs and health checks
    fn backend_name(&self) -> &'static str;
}

/// Extension trait providing typed JSON get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    ///
    /// A blank stored value reads as absent. A value that does not deserialize
    /// is reported as [`DomainError::MalformedCacheEntry`].
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) if !data.trim().is_empty() => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::malformed_cache_entry(key, e.to_string())
                    })?;
                    Ok(Some(value))
                }
                _ => Ok(None),
            }
        }
    }

    /// Serializes a value to JSON and stores it
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::malformed_cache_entry(key, format!("failed to serialize: {}", e))
            })?;
            self.set_raw(key, &data).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}
