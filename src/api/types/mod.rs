//! API types

pub mod error;
pub mod geocode;

pub use error::ApiError;
pub use geocode::{PointParams, StateByZipResponse};
