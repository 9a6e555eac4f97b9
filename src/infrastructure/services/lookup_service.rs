//! Lookup service executing query shapes directly against the record store

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::location::{normalize_state_code, KeywordQuery, LocationRepository, SearchArea};
use crate::domain::{
    DomainError, GeoLookup, LookupOperation, LookupResult, PointQuery, StateSummary,
};
use crate::infrastructure::observability::record_lookup;

/// Lookup limits (`[lookup]` section)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Radius used by lat/long lookups that don't name one
    pub default_radius_miles: u32,
    /// Result cap used by lat/long lookups that don't name one
    pub default_limit: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: PointQuery::DEFAULT_RADIUS_MILES,
            default_limit: PointQuery::DEFAULT_LIMIT,
        }
    }
}

/// Uncached lookups over a record store
pub struct LookupService {
    repository: Arc<dyn LocationRepository>,
    config: LookupConfig,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LookupService {
    pub fn new(repository: Arc<dyn LocationRepository>) -> Self {
        Self::with_config(repository, LookupConfig::default())
    }

    pub fn with_config(repository: Arc<dyn LocationRepository>, config: LookupConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn LocationRepository> {
        &self.repository
    }
}

/// Times a store call and records its outcome
async fn timed<T, F>(operation: LookupOperation, fut: F) -> Result<T, DomainError>
where
    F: std::future::Future<Output = Result<T, DomainError>>,
{
    let started = Instant::now();
    let result = fut.await;
    record_lookup(operation, started.elapsed(), result.is_ok());
    result
}

#[async_trait]
impl GeoLookup for LookupService {
    #[instrument(skip(self))]
    async fn keyword_lookup(&self, keyword: &str) -> Result<LookupResult, DomainError> {
        let query = KeywordQuery::parse(keyword)?;

        let records = timed(
            LookupOperation::KeywordLookup,
            self.repository
                .find_by_keyword(&query, KeywordQuery::LIMIT),
        )
        .await?;

        debug!(count = records.len(), "Keyword lookup completed");
        Ok(LookupResult::found(records))
    }

    #[instrument(skip(self))]
    async fn zipcode_lookup(&self, zip: i32) -> Result<LookupResult, DomainError> {
        let records = timed(
            LookupOperation::ZipcodeLookup,
            self.repository.find_by_postal_code(zip),
        )
        .await?;

        Ok(LookupResult::found(records))
    }

    #[instrument(skip(self))]
    async fn statecode_lookup(&self, state_code: &str) -> Result<LookupResult, DomainError> {
        let code = normalize_state_code(state_code)?;

        let records = timed(
            LookupOperation::StatecodeLookup,
            self.repository.find_by_state_code(&code),
        )
        .await?;

        Ok(LookupResult::found(records))
    }

    #[instrument(skip(self))]
    async fn point_lookup(&self, query: PointQuery) -> Result<LookupResult, DomainError> {
        query.validate()?;

        let area = SearchArea::new(query.lat, query.lng, query.radius_miles);
        let repository = &self.repository;

        let records = timed(LookupOperation::LatLongLookup, async move {
            let points = repository.project_points().await?;
            let selected = area.select(&points, query.limit);

            if selected.is_empty() {
                return Ok(Vec::new());
            }

            let ids: Vec<_> = selected.iter().map(|p| p.id).collect();
            repository.find_by_ids(&ids).await
        })
        .await?;

        debug!(
            count = records.len(),
            radius_km = area.radius_km(),
            "Point lookup completed"
        );
        Ok(LookupResult::found(records))
    }

    fn default_point_query(&self, lat: f64, lng: f64) -> PointQuery {
        PointQuery::new(lat, lng)
            .with_radius(self.config.default_radius_miles)
            .with_limit(self.config.default_limit)
    }

    #[instrument(skip(self))]
    async fn state_by_zip(&self, zip: i32) -> Result<Option<String>, DomainError> {
        timed(
            LookupOperation::GetStateByZip,
            self.repository.state_name_by_postal_code(zip),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn states(&self) -> Result<Vec<StateSummary>, DomainError> {
        timed(LookupOperation::GetStates, self.repository.distinct_states()).await
    }

    #[instrument(skip(self))]
    async fn all_locations(&self) -> Result<LookupResult, DomainError> {
        let records = timed(LookupOperation::GetAllGeoData, self.repository.project_all()).await?;

        debug!(count = records.len(), "Full dataset dump");
        Ok(LookupResult::found(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{LocationId, LocationRecord, MockLocationRepository};
    use crate::infrastructure::location::InMemoryLocationRepository;

    fn springfield() -> LocationRecord {
        LocationRecord::new(1, 39.78, -89.65, "Springfield", "IL", "Illinois", 62701)
            .with_county("Sangamon")
    }

    fn service_with(records: Vec<LocationRecord>) -> LookupService {
        LookupService::new(Arc::new(InMemoryLocationRepository::with_records(records)))
    }

    fn ids(result: &LookupResult) -> Vec<i64> {
        result.data.iter().map(|r| r.id().value()).collect()
    }

    #[tokio::test]
    async fn test_springfield_scenario() {
        let service = service_with(vec![springfield()]);

        let by_keyword = service.keyword_lookup("Springfield").await.unwrap();
        assert!(by_keyword.success);
        assert_eq!(ids(&by_keyword), vec![1]);

        let by_zip = service.zipcode_lookup(62701).await.unwrap();
        assert_eq!(by_zip.data, by_keyword.data);

        assert_eq!(
            service.state_by_zip(62701).await.unwrap().as_deref(),
            Some("Illinois")
        );

        let near = service.lat_long_lookup(39.78, -89.65).await.unwrap();
        assert_eq!(ids(&near), vec![1]);

        let far = service.lat_long_lookup(0.0, 0.0).await.unwrap();
        assert!(far.success);
        assert!(far.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_matches_state_county_and_zip() {
        let service = service_with(vec![springfield()]);

        for keyword in ["springfield", "Illinois", "sangamon", "62701", "  SPRING  "] {
            let result = service.keyword_lookup(keyword).await.unwrap();
            assert_eq!(ids(&result), vec![1], "keyword {:?}", keyword);
        }

        let none = service.keyword_lookup("Chicago").await.unwrap();
        assert!(none.success);
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_blank_is_invalid() {
        let service = service_with(vec![springfield()]);

        let result = service.keyword_lookup("   ").await;
        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_keyword_limit_enforced() {
        let records = (1..=25)
            .map(|id| LocationRecord::new(id, 40.0, -90.0, "Springfield", "IL", "Illinois", 62700))
            .collect();
        let service = service_with(records);

        let result = service.keyword_lookup("springfield").await.unwrap();
        assert_eq!(result.len(), 10);
        assert_eq!(ids(&result), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_keyword_limit_ignores_point_limit_config() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_by_keyword()
            .withf(|_, limit| *limit == 10)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let config = LookupConfig {
            default_limit: 50,
            ..Default::default()
        };
        let service = LookupService::with_config(Arc::new(repo), config);

        let result = service.keyword_lookup("springfield").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_keyword_store_failure_propagates() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_by_keyword()
            .returning(|_, _| Err(DomainError::store_unavailable("connection refused")));

        let service = LookupService::new(Arc::new(repo));
        let result = service.keyword_lookup("springfield").await;

        assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_statecode_is_normalized() {
        let service = service_with(vec![springfield()]);

        let result = service.statecode_lookup(" il ").await.unwrap();
        assert_eq!(ids(&result), vec![1]);

        let empty = service.statecode_lookup("TX").await.unwrap();
        assert!(empty.success);
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_zipcode_without_match() {
        let service = service_with(vec![springfield()]);

        let result = service.zipcode_lookup(94105).await.unwrap();
        assert!(result.success);
        assert!(result.is_empty());
        assert_eq!(service.state_by_zip(94105).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_point_lookup_limit_and_radius() {
        let mut records: Vec<_> = (1..=15)
            .map(|id| LocationRecord::new(id, 39.78, -89.65, "Springfield", "IL", "Illinois", 62701))
            .collect();
        // roughly 11 miles north
        records.push(LocationRecord::new(99, 39.94, -89.65, "Williamsville", "IL", "Illinois", 62693));
        let service = service_with(records);

        let capped = service.lat_long_lookup(39.78, -89.65).await.unwrap();
        assert_eq!(capped.len(), 10);

        let wide = service
            .point_lookup(PointQuery::new(39.78, -89.65).with_radius(15).with_limit(100))
            .await
            .unwrap();
        assert_eq!(wide.len(), 16);
        assert!(ids(&wide).contains(&99));

        let narrow = service
            .point_lookup(PointQuery::new(39.78, -89.65).with_limit(100))
            .await
            .unwrap();
        assert!(!ids(&narrow).contains(&99));
    }

    #[tokio::test]
    async fn test_point_lookup_near_pole() {
        let service = service_with(vec![LocationRecord::new(
            7, 89.9, 10.0, "Polar", "AK", "Alaska", 99999,
        )]);

        let result = service.lat_long_lookup(89.9, 10.0).await.unwrap();
        assert_eq!(ids(&result), vec![7]);
    }

    #[tokio::test]
    async fn test_point_lookup_rejects_bad_coordinates() {
        let service = service_with(vec![springfield()]);

        let result = service.lat_long_lookup(91.0, 0.0).await;
        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));

        let result = service.lat_long_lookup(0.0, f64::NAN).await;
        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_point_lookup_skips_fetch_when_nothing_selected() {
        let mut repo = MockLocationRepository::new();
        repo.expect_project_points().times(1).returning(|| Ok(Vec::new()));
        repo.expect_find_by_ids().times(0);

        let service = LookupService::new(Arc::new(repo));
        let result = service.lat_long_lookup(39.78, -89.65).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_point_lookup_fetches_selected_ids() {
        let mut repo = MockLocationRepository::new();
        repo.expect_project_points()
            .returning(|| Ok(vec![springfield().point()]));
        repo.expect_find_by_ids()
            .withf(|ids| ids == [LocationId::new(1)])
            .times(1)
            .returning(|_| Ok(vec![springfield()]));

        let service = LookupService::new(Arc::new(repo));
        let result = service.lat_long_lookup(39.78, -89.65).await.unwrap();

        assert_eq!(ids(&result), vec![1]);
    }

    #[tokio::test]
    async fn test_states_are_distinct() {
        let service = service_with(vec![
            springfield(),
            LocationRecord::new(2, 41.88, -87.63, "Chicago", "IL", "Illinois", 60601),
            LocationRecord::new(3, 30.27, -97.74, "Austin", "TX", "Texas", 73301),
        ]);

        let states = service.states().await.unwrap();
        assert_eq!(
            states,
            vec![
                StateSummary::new("IL", "Illinois"),
                StateSummary::new("TX", "Texas"),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_locations_is_narrow() {
        let service = service_with(vec![springfield()]);

        let result = service.all_locations().await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.data[0].county_name(), None);
    }

    #[test]
    fn test_default_point_query_uses_config() {
        let config = LookupConfig {
            default_radius_miles: 9,
            default_limit: 3,
            ..Default::default()
        };
        let service = LookupService::with_config(
            Arc::new(InMemoryLocationRepository::new()),
            config,
        );

        let query = service.default_point_query(1.0, 2.0);
        assert_eq!(query.radius_miles, 9);
        assert_eq!(query.limit, 3);
    }
}
