//! In-memory record store

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use async_trait::async_trait;

use crate::domain::location::{
    KeywordQuery, LocationId, LocationPoint, LocationRecord, LocationRepository, StateSummary,
};
use crate::domain::DomainError;

/// Record store holding the whole dataset in memory
///
/// Records keep their load order, which is the iteration order every query
/// reports. The dataset is read-only after construction, so no locking is needed.
#[derive(Debug, Default)]
pub struct InMemoryLocationRepository {
    records: Vec<LocationRecord>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records
    pub fn with_records(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// Loads a JSON array of records from disk
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read dataset '{}': {}",
                path.display(),
                e
            ))
        })?;

        let records: Vec<LocationRecord> = serde_json::from_str(&contents).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to parse dataset '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self::with_records(records))
    }

    fn filter<F>(&self, predicate: F) -> Vec<LocationRecord>
    where
        F: Fn(&LocationRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_by_keyword(
        &self,
        query: &KeywordQuery,
        limit: usize,
    ) -> Result<Vec<LocationRecord>, DomainError> {
        Ok(self
            .records
            .iter()
            .filter(|r| query.matches(r))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_postal_code(&self, zip: i32) -> Result<Vec<LocationRecord>, DomainError> {
        Ok(self.filter(|r| r.zip() == zip))
    }

    async fn find_by_state_code(
        &self,
        state_code: &str,
    ) -> Result<Vec<LocationRecord>, DomainError> {
        Ok(self.filter(|r| r.state_code() == state_code))
    }

    async fn find_by_ids(&self, ids: &[LocationId]) -> Result<Vec<LocationRecord>, DomainError> {
        let wanted: HashSet<LocationId> = ids.iter().copied().collect();
        Ok(self.filter(|r| wanted.contains(&r.id())))
    }

    async fn state_name_by_postal_code(&self, zip: i32) -> Result<Option<String>, DomainError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.zip() == zip)
            .map(|r| r.state_name().to_string()))
    }

    async fn project_points(&self) -> Result<Vec<LocationPoint>, DomainError> {
        Ok(self.records.iter().map(LocationRecord::point).collect())
    }

    async fn distinct_states(&self) -> Result<Vec<StateSummary>, DomainError> {
        let states: BTreeSet<StateSummary> = self
            .records
            .iter()
            .map(|r| StateSummary::new(r.state_code(), r.state_name()))
            .collect();

        Ok(states.into_iter().collect())
    }

    async fn project_all(&self) -> Result<Vec<LocationRecord>, DomainError> {
        Ok(self.records.iter().map(LocationRecord::narrow).collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.records.len())
    }
}
