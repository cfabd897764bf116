use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed retrospective window an SLA record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaPeriod {
    Hour,
    Day,
    Week,
    Month,
}

impl SlaPeriod {
    pub const ALL: [SlaPeriod; 4] = [Self::Hour, Self::Day, Self::Week, Self::Month];

    /// Window length in minutes.
    pub fn minutes(self) -> i64 {
        match self {
            Self::Hour => 60,
            Self::Day => 1_440,
            Self::Week => 10_080,
            Self::Month => 43_200,
        }
    }
}

impl std::fmt::Display for SlaPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(s)
    }
}

/// Uptime and latency aggregate over one window. Recomputed from probe
/// history each cycle — always a fresh aggregate, never a stored delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaRecord {
    pub service_id: String,
    pub period: SlaPeriod,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub total_probes: u64,
    pub successful_probes: u64,
    /// successful / total × 100; 0.0 for an empty window, never NaN.
    pub uptime_percent: f64,
    pub avg_latency_ms: f64,
    pub p95_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Failed probes × assumed probe spacing. An estimate, not a measurement.
    pub outage_minutes: u64,
}
