//! # vigil-sla
//!
//! Pure SLA computation over health-probe history: uptime percent and
//! latency percentiles for the four fixed windows, recomputed fresh each
//! cycle.

pub mod tracker;

pub use tracker::{compute_sla, compute_window};
