//! # vigil-fetch
//!
//! Everything that talks to the outside world: the fleet-management API
//! client with retry and a shared circuit breaker, and the health-probe
//! path that never raises.

pub mod breaker;
pub mod catalog;
pub mod client;
pub mod probe;

pub use breaker::{BreakerSnapshot, CircuitBreaker};
pub use catalog::FleetCatalog;
pub use client::{ApiClient, ApiClientConfig};
