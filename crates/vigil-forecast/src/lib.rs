//! # vigil-forecast
//!
//! Ordinary least-squares regression over daily aggregate cost, trend
//! classification, and clamped forward projections.

pub mod forecast;
pub mod regression;

pub use forecast::forecast_costs;
pub use regression::{fit, Regression};
