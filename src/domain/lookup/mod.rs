//! Lookup domain - query shapes, the response envelope and the service contract

mod operation;
mod result;
mod service;

pub use operation::{LookupOperation, PointQuery};
pub use result::LookupResult;
pub use service::GeoLookup;
