//! Infrastructure services

mod cached_lookup_service;
mod lookup_service;

pub use cached_lookup_service::CachedLookupService;
pub use lookup_service::{LookupConfig, LookupService};
