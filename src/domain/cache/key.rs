//! Cache key construction
//!
//! Keys have the shape `{Operation}_{param1}_{param2}...`. The operation name is
//! a fixed token, so keys of different operations can never collide.

use std::fmt;

use crate::domain::lookup::{LookupOperation, PointQuery};

/// Parameters for cache key generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyParams {
    /// Namespace token
    pub operation: LookupOperation,
    /// Positional, already-normalized parameters
    pub components: Vec<String>,
}

impl CacheKeyParams {
    pub fn new(operation: LookupOperation) -> Self {
        Self {
            operation,
            components: Vec::new(),
        }
    }

    /// Appends a positional component
    pub fn with_component(mut self, value: impl fmt::Display) -> Self {
        self.components.push(value.to_string());
        self
    }

    /// Appends a coordinate with a stable textual form
    pub fn with_coordinate(self, value: f64) -> Self {
        self.with_component(format_coordinate(value))
    }

    pub fn generate(&self) -> String {
        let mut key = self.operation.as_str().to_string();

        for component in &self.components {
            key.push('_');
            key.push_str(component);
        }

        key
    }

    // Builders for each cached operation. Callers pass normalized inputs.

    pub fn keyword(normalized_keyword: &str) -> Self {
        Self::new(LookupOperation::KeywordLookup).with_component(normalized_keyword)
    }

    pub fn zipcode(zip: i32) -> Self {
        Self::new(LookupOperation::ZipcodeLookup).with_component(zip)
    }

    pub fn statecode(normalized_code: &str) -> Self {
        Self::new(LookupOperation::StatecodeLookup).with_component(normalized_code)
    }

    pub fn lat_long(query: &PointQuery) -> Self {
        Self::new(LookupOperation::LatLongLookup)
            .with_coordinate(query.lat)
            .with_coordinate(query.lng)
            .with_component(query.radius_miles)
            .with_component(query.limit)
    }

    pub fn state_by_zip(zip: i32) -> Self {
        Self::new(LookupOperation::GetStateByZip).with_component(zip)
    }

    pub fn states() -> Self {
        Self::new(LookupOperation::GetStates)
    }
}

impl fmt::Display for CacheKeyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.generate())
    }
}

/// Shortest round-trip decimal form, with negative zero folded into zero
fn format_coordinate(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}
