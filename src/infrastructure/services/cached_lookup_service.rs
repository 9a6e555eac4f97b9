//! Cache-aside wrapper around a lookup service
//!
//! Every cached operation builds a deterministic key, tries the cache, and on a
//! miss delegates to the inner service and writes the result back. Cache
//! faults never fail a lookup: reads fall through to the store and failed
//! writes are logged and dropped. Nothing here deletes or overwrites entries
//! other than by refilling them after a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::location::{normalize_state_code, KeywordQuery};
use crate::domain::{
    Cache, CacheExt, CacheKeyParams, DomainError, GeoLookup, LookupOperation, LookupResult,
    PointQuery, StateSummary,
};
use crate::infrastructure::observability::{record_cache_error, record_cache_hit, record_cache_miss};

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(250);

/// Lookup service with read-through caching
pub struct CachedLookupService<L: GeoLookup> {
    inner: L,
    cache: Arc<dyn Cache>,
    operation_timeout: Duration,
}

impl<L: GeoLookup> CachedLookupService<L> {
    pub fn new(inner: L, cache: Arc<dyn Cache>) -> Self {
        Self {
            inner,
            cache,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Bounds every cache read and write; an elapsed call counts as a cache outage
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.operation_timeout, fut)
            .await
            .unwrap_or_else(|_| {
                Err(DomainError::cache_unavailable(format!(
                    "{} cache call timed out after {:?}",
                    self.cache.backend_name(),
                    self.operation_timeout
                )))
            })
    }

    async fn read<T>(&self, operation: LookupOperation, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let outcome = self.bounded(self.cache.get::<T>(key)).await;
        observe(operation, key, outcome)
    }

    async fn write<T>(&self, operation: LookupOperation, key: &str, value: &T)
    where
        T: Serialize + Send + Sync,
    {
        if let Err(e) = self.bounded(self.cache.set(key, value)).await {
            warn!(%operation, key, error = %e, "Cache write failed, result not cached");
            record_cache_error(operation);
        }
    }

    /// Cache-aside protocol shared by every structured result
    async fn read_through<T, F, Fut>(&self, key: CacheKeyParams, load: F) -> Result<T, DomainError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        let operation = key.operation;
        let key = key.generate();

        if let Some(cached) = self.read::<T>(operation, &key).await {
            return Ok(cached);
        }

        let value = load().await?;
        self.write(operation, &key, &value).await;

        Ok(value)
    }
}

/// Logs and counts a cache read, folding every fault into a miss
fn observe<T>(
    operation: LookupOperation,
    key: &str,
    outcome: Result<Option<T>, DomainError>,
) -> Option<T> {
    match outcome {
        Ok(Some(value)) => {
            debug!(%operation, key, "Cache hit");
            record_cache_hit(operation);
            Some(value)
        }
        Ok(None) => {
            debug!(%operation, key, "Cache miss");
            record_cache_miss(operation);
            None
        }
        Err(e) => {
            warn!(%operation, key, error = %e, "Cache read failed, falling back to store");
            record_cache_error(operation);
            None
        }
    }
}

#[async_trait]
impl<L: GeoLookup> GeoLookup for CachedLookupService<L> {
    #[instrument(skip(self))]
    async fn keyword_lookup(&self, keyword: &str) -> Result<LookupResult, DomainError> {
        let query = KeywordQuery::parse(keyword)?;

        self.read_through(CacheKeyParams::keyword(query.keyword()), || {
            self.inner.keyword_lookup(query.keyword())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn zipcode_lookup(&self, zip: i32) -> Result<LookupResult, DomainError> {
        self.read_through(CacheKeyParams::zipcode(zip), || {
            self.inner.zipcode_lookup(zip)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn statecode_lookup(&self, state_code: &str) -> Result<LookupResult, DomainError> {
        let code = normalize_state_code(state_code)?;

        self.read_through(CacheKeyParams::statecode(&code), || {
            self.inner.statecode_lookup(&code)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn point_lookup(&self, query: PointQuery) -> Result<LookupResult, DomainError> {
        query.validate()?;

        self.read_through(CacheKeyParams::lat_long(&query), || {
            self.inner.point_lookup(query)
        })
        .await
    }

    fn default_point_query(&self, lat: f64, lng: f64) -> PointQuery {
        self.inner.default_point_query(lat, lng)
    }

    /// Caches the bare state name rather than a JSON envelope
    #[instrument(skip(self))]
    async fn state_by_zip(&self, zip: i32) -> Result<Option<String>, DomainError> {
        let operation = LookupOperation::GetStateByZip;
        let key = CacheKeyParams::state_by_zip(zip).generate();

        let cached = self
            .bounded(self.cache.get_raw(&key))
            .await
            .map(|value| value.filter(|name| !name.trim().is_empty()));

        if let Some(name) = observe(operation, &key, cached) {
            return Ok(Some(name));
        }

        let state = self.inner.state_by_zip(zip).await?;

        // absent names are not cached, so a later load of the zip is picked up
        if let Some(name) = state.as_deref().filter(|name| !name.trim().is_empty()) {
            if let Err(e) = self.bounded(self.cache.set_raw(&key, name)).await {
                warn!(%operation, key = %key, error = %e, "Cache write failed, result not cached");
                record_cache_error(operation);
            }
        }

        Ok(state)
    }

    #[instrument(skip(self))]
    async fn states(&self) -> Result<Vec<StateSummary>, DomainError> {
        self.read_through(CacheKeyParams::states(), || self.inner.states())
            .await
    }

    /// Full-table dumps always bypass the cache
    #[instrument(skip(self))]
    async fn all_locations(&self) -> Result<LookupResult, DomainError> {
        self.inner.all_locations().await
    }
}
