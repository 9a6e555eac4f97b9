//! Location record entity and projections

use serde::{Deserialize, Serialize};

/// Stable identifier of a location record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LocationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference location record, owned by the record store and never mutated here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    id: LocationId,
    /// Latitude in decimal degrees
    lat: f64,
    /// Longitude in decimal degrees
    lng: f64,
    city: String,
    /// Absent in the narrow full-table projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    county_name: Option<String>,
    state_name: String,
    state_code: String,
    zip: i32,
}

impl LocationRecord {
    pub fn new(
        id: impl Into<LocationId>,
        lat: f64,
        lng: f64,
        city: impl Into<String>,
        state_code: impl Into<String>,
        state_name: impl Into<String>,
        zip: i32,
    ) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            city: city.into(),
            county_name: None,
            state_name: state_name.into(),
            state_code: state_code.into(),
            zip,
        }
    }

    pub fn with_county(mut self, county_name: impl Into<String>) -> Self {
        self.county_name = Some(county_name.into());
        self
    }

    // Getters

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn county_name(&self) -> Option<&str> {
        self.county_name.as_deref()
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }

    pub fn zip(&self) -> i32 {
        self.zip
    }

    /// Projection used by the full-table dump (county dropped)
    pub fn narrow(&self) -> Self {
        Self {
            county_name: None,
            ..self.clone()
        }
    }

    /// Coordinate-only projection used by the proximity scan
    pub fn point(&self) -> LocationPoint {
        LocationPoint {
            id: self.id,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// `(id, lat, lng)` projection scanned by the proximity search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationPoint {
    pub id: LocationId,
    pub lat: f64,
    pub lng: f64,
}

/// Distinct state code / state name pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub state_code: String,
    pub state_name: String,
}

impl StateSummary {
    pub fn new(state_code: impl Into<String>, state_name: impl Into<String>) -> Self {
        Self {
            state_code: state_code.into(),
            state_name: state_name.into(),
        }
    }
}
