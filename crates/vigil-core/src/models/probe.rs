use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one health probe. A probe never fails as an error: network
/// faults, timeouts, and unparseable bodies all fold into `ok = false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthProbe {
    pub ok: bool,
    pub status_code: Option<u16>,
    pub latency_ms: u64,
    // Optional fields a service's health endpoint may self-report.
    pub version: Option<String>,
    pub uptime_seconds: Option<f64>,
    pub memory_mb: Option<f64>,
    pub request_count: Option<u64>,
    pub error_rate: Option<f64>,
}

/// A probe outcome bound to a service and time, for SLA history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub service_id: String,
    pub timestamp: DateTime<Utc>,
    pub ok: bool,
    pub latency_ms: u64,
    pub status_code: Option<u16>,
}

impl ProbeRecord {
    pub fn from_probe(service_id: &str, timestamp: DateTime<Utc>, probe: &HealthProbe) -> Self {
        Self {
            service_id: service_id.to_string(),
            timestamp,
            ok: probe.ok,
            latency_ms: probe.latency_ms,
            status_code: probe.status_code,
        }
    }
}
