//! Record store trait

use async_trait::async_trait;

use super::entity::{LocationId, LocationPoint, LocationRecord, StateSummary};
use super::query::KeywordQuery;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read-only access to the reference location dataset
///
/// Implementations return records in store iteration order. Every method is an
/// independent read; none of them is transactional.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Records matching keyword criteria, at most `limit`
    async fn find_by_keyword(
        &self,
        query: &KeywordQuery,
        limit: usize,
    ) -> Result<Vec<LocationRecord>, DomainError>;

    /// Records with an exact postal code
    async fn find_by_postal_code(&self, zip: i32) -> Result<Vec<LocationRecord>, DomainError>;

    /// Records with an exact (normalized) state code
    async fn find_by_state_code(
        &self,
        state_code: &str,
    ) -> Result<Vec<LocationRecord>, DomainError>;

    /// Full records for the given ids, in store order
    async fn find_by_ids(&self, ids: &[LocationId]) -> Result<Vec<LocationRecord>, DomainError>;

    /// State name of the first record with the postal code
    async fn state_name_by_postal_code(&self, zip: i32) -> Result<Option<String>, DomainError>;

    /// `(id, lat, lng)` of every record
    async fn project_points(&self) -> Result<Vec<LocationPoint>, DomainError>;

    /// Distinct state code / name pairs
    async fn distinct_states(&self) -> Result<Vec<StateSummary>, DomainError>;

    /// Every record in the narrow projection (no county). Unbounded.
    async fn project_all(&self) -> Result<Vec<LocationRecord>, DomainError>;

    /// Number of records in the store
    async fn count(&self) -> Result<usize, DomainError>;
}
