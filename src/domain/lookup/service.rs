//! Lookup service contract shared by the direct and cached services

use async_trait::async_trait;

use super::operation::PointQuery;
use super::result::LookupResult;
use crate::domain::location::StateSummary;
use crate::domain::DomainError;

/// In-process geographic lookup contract
///
/// Store failures surface as `Err`; an `Ok` envelope with no data means the
/// query matched nothing.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// City substring, state name, county name or postal code match (≤ keyword limit)
    async fn keyword_lookup(&self, keyword: &str) -> Result<LookupResult, DomainError>;

    /// Exact postal code match
    async fn zipcode_lookup(&self, zip: i32) -> Result<LookupResult, DomainError>;

    /// Exact state code match
    async fn statecode_lookup(&self, state_code: &str) -> Result<LookupResult, DomainError>;

    /// Proximity search with explicit radius and limit
    async fn point_lookup(&self, query: PointQuery) -> Result<LookupResult, DomainError>;

    /// Proximity search with the configured default radius and limit
    async fn lat_long_lookup(&self, lat: f64, lng: f64) -> Result<LookupResult, DomainError> {
        self.point_lookup(self.default_point_query(lat, lng)).await
    }

    /// Builds a point query using the configured defaults
    fn default_point_query(&self, lat: f64, lng: f64) -> PointQuery;

    /// State name of the first record with the postal code
    async fn state_by_zip(&self, zip: i32) -> Result<Option<String>, DomainError>;

    /// Distinct state code / name pairs
    async fn states(&self) -> Result<Vec<StateSummary>, DomainError>;

    /// Unbounded full-table dump in the narrow projection
    async fn all_locations(&self) -> Result<LookupResult, DomainError>;
}
