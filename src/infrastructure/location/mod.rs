//! Record store implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{LocationRepositoryFactory, StorageConfig, StorageType};
pub use in_memory::InMemoryLocationRepository;
pub use postgres::{PostgresConfig, PostgresLocationRepository};
