//! SQL per entity family, all operating on a borrowed connection.

pub mod alert_ops;
pub mod cost_ops;
pub mod incident_ops;
pub mod rule_ops;
pub mod service_ops;
pub mod telemetry_ops;
