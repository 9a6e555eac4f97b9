//! Domain layer - Core lookup types, collaborator traits and errors

pub mod cache;
pub mod error;
pub mod location;
pub mod lookup;

pub use cache::{Cache, CacheExt, CacheKeyParams};
pub use error::DomainError;
pub use location::{
    KeywordQuery, LocationId, LocationPoint, LocationRecord, LocationRepository, SearchArea,
    StateSummary,
};
pub use lookup::{GeoLookup, LookupOperation, LookupResult, PointQuery};
