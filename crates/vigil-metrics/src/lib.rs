//! # vigil-metrics
//!
//! Pure computations over immutable metric history: windowed aggregation
//! and the three anomaly detectors. Nothing here mutates its input or
//! touches I/O.

pub mod aggregate;
pub mod detectors;

pub use aggregate::{aggregate_windows, WindowStats};
pub use detectors::{detect_cost, detect_statistical, detect_trend};
