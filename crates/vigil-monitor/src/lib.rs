//! # vigil-monitor
//!
//! The poll orchestrator. Owns the in-memory snapshot, sequences every
//! cycle step with per-service failure isolation, schedules polling, and
//! exposes the dashboard query surface plus a broadcast channel of deltas.

pub mod engine;
pub mod events;
pub mod queries;
pub mod scheduler;
pub mod state;
pub mod tracing_setup;

mod poll;

pub use engine::MonitorEngine;
pub use events::MonitorEvent;
pub use queries::{AlertFilter, IncidentFilter, InfrastructureSnapshot, ServiceDetail};
pub use scheduler::run_scheduler;
