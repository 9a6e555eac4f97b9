//! Infrastructure layer - Cache and record store backends, services, observability

pub mod cache;
pub mod location;
pub mod logging;
pub mod observability;
pub mod services;
