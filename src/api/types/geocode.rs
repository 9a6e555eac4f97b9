//! Request and response types for the geocode endpoints

use serde::{Deserialize, Serialize};

/// Query string of `GET /v1/geocode/point`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointParams {
    pub lat: f64,
    pub lng: f64,
    /// Radius in miles; the configured default when absent
    pub radius: Option<u32>,
    /// Result cap; the configured default when absent
    pub limit: Option<usize>,
}

/// Body of `GET /v1/geocode/zip/{zip}/state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateByZipResponse {
    pub zip: i32,
    pub state_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_by_zip_serialization() {
        let response = StateByZipResponse {
            zip: 62701,
            state_name: Some("Illinois".to_string()),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"zip":62701,"stateName":"Illinois"}"#);
    }
}
