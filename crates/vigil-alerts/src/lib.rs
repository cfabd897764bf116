//! # vigil-alerts
//!
//! Rule evaluation against current service state and anomaly output, with
//! duration-based debouncing and the full alert lifecycle.

pub mod engine;
pub mod rules;

pub use engine::{AlertChanges, AlertEngine};
pub use rules::validate_rule;
