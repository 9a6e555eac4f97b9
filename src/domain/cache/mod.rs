//! Cache domain - key-value cache abstraction used by the cache-aside layer

mod key;
mod repository;

pub use key::CacheKeyParams;
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
