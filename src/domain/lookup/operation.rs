//! Lookup operations and their validated inputs

use std::fmt;

use crate::domain::DomainError;

/// Every query shape exposed by the lookup services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupOperation {
    KeywordLookup,
    ZipcodeLookup,
    StatecodeLookup,
    LatLongLookup,
    GetStateByZip,
    GetStates,
    GetAllGeoData,
}

impl LookupOperation {
    /// Fixed operation name, also the cache key namespace
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeywordLookup => "KeywordLookup",
            Self::ZipcodeLookup => "ZipcodeLookup",
            Self::StatecodeLookup => "StatecodeLookup",
            Self::LatLongLookup => "LatLongLookup",
            Self::GetStateByZip => "GetStateByZip",
            Self::GetStates => "GetStates",
            Self::GetAllGeoData => "GetAllGeoData",
        }
    }
}

impl fmt::Display for LookupOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proximity search around a coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_miles: u32,
    pub limit: usize,
}

impl PointQuery {
    pub const DEFAULT_RADIUS_MILES: u32 = 4;
    pub const DEFAULT_LIMIT: usize = 10;

    /// Builds a query with the default radius and limit
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius_miles: Self::DEFAULT_RADIUS_MILES,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_radius(mut self, radius_miles: u32) -> Self {
        self.radius_miles = radius_miles;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(DomainError::invalid_input(format!(
                "latitude must be within [-90, 90], got {}",
                self.lat
            )));
        }

        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(DomainError::invalid_input(format!(
                "longitude must be within [-180, 180], got {}",
                self.lng
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_are_distinct() {
        let ops = [
            LookupOperation::KeywordLookup,
            LookupOperation::ZipcodeLookup,
            LookupOperation::StatecodeLookup,
            LookupOperation::LatLongLookup,
            LookupOperation::GetStateByZip,
            LookupOperation::GetStates,
            LookupOperation::GetAllGeoData,
        ];
        let names: std::collections::HashSet<&str> = ops.iter().map(|o| o.as_str()).collect();
        assert_eq!(names.len(), ops.len());
    }

    #[test]
    fn test_point_query_defaults() {
        let query = PointQuery::new(39.78, -89.65);
        assert_eq!(query.radius_miles, 4);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_point_query_validation() {
        assert!(PointQuery::new(0.0, 0.0).validate().is_ok());
        assert!(PointQuery::new(90.0, 180.0).validate().is_ok());
        assert!(PointQuery::new(90.1, 0.0).validate().is_err());
        assert!(PointQuery::new(0.0, -180.5).validate().is_err());
        assert!(PointQuery::new(f64::NAN, 0.0).validate().is_err());
        assert!(PointQuery::new(0.0, f64::INFINITY).validate().is_err());
    }
}
