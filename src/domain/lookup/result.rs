//! Lookup response envelope

use serde::{Deserialize, Serialize};

use crate::domain::location::LocationRecord;

/// Envelope returned by every record-returning lookup
///
/// `success == true` with empty `data` means no matches. `success == false`
/// always carries an empty `data` and a `message` explaining the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub data: Vec<LocationRecord>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupResult {
    /// Successful lookup; `data` may be empty
    pub fn found(data: Vec<LocationRecord>) -> Self {
        Self {
            data,
            success: true,
            message: None,
        }
    }

    /// Failed lookup with an explanation
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            success: false,
            message: Some(message.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
