//! Error responses carried in the lookup envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{DomainError, LookupResult};

/// API error with status code and a failed `LookupResult` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: LookupResult,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: LookupResult::failed(message),
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Service unavailable
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidInput { message } => Self::bad_request(message),
            DomainError::StoreUnavailable { .. } => {
                tracing::error!(error = %err, "Record store unavailable");
                Self::unavailable(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Unexpected lookup failure");
                Self::internal(err.to_string())
            }
        }
    }
}
