//! Location domain
//!
//! Reference location records, the read-only record store trait, and the
//! proximity filter used for point searches.

mod entity;
mod proximity;
mod query;
mod repository;

pub use entity::{LocationId, LocationPoint, LocationRecord, StateSummary};
pub use proximity::{SearchArea, KM_PER_DEGREE_LAT, KM_PER_MILE};
pub use query::{normalize_state_code, KeywordQuery};
pub use repository::LocationRepository;

#[cfg(test)]
pub use repository::MockLocationRepository;
