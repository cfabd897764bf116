//! # vigil-incidents
//!
//! Groups related alerts into incidents by service affinity and temporal
//! proximity, mirrors alert lifecycle events into incident timelines, and
//! auto-resolves incidents once every constituent alert has cleared.

pub mod engine;

pub use engine::{IncidentChanges, IncidentEngine};
