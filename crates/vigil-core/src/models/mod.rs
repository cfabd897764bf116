//! Data model: one file per entity.

pub mod alert;
pub mod anomaly;
pub mod audit;
pub mod cost;
pub mod cycle_error;
pub mod deployment;
pub mod incident;
pub mod metric_sample;
pub mod probe;
pub mod service;
pub mod sla;

pub use alert::{Alert, AlertRule, AlertStatus, RuleCondition, RuleMetric, Severity};
pub use anomaly::{Anomaly, AnomalyKind};
pub use audit::{AuditActor, AuditOperation, AuditRecord};
pub use cost::{CostEntry, CostForecast, CostPoint, CostTrend};
pub use cycle_error::CycleError;
pub use deployment::Deployment;
pub use incident::{Incident, IncidentEvent, IncidentEventKind, IncidentStatus};
pub use metric_sample::MetricSample;
pub use probe::{HealthProbe, ProbeRecord};
pub use service::{Service, ServiceStatus};
pub use sla::{SlaPeriod, SlaRecord};
