use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point in a service's metric time series. Immutable once recorded;
/// history is append-only and trimmed from the oldest end at the cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub service_id: String,
    pub project_id: String,
    pub cpu_percent: f64,
    pub memory_mb: f64,
    pub network_rx_kb: f64,
    pub network_tx_kb: f64,
}

impl MetricSample {
    /// Value of the named metric, or None for a name this sample doesn't carry.
    pub fn value(&self, metric: &str) -> Option<f64> {
        match metric {
            "cpu" => Some(self.cpu_percent),
            "memory" => Some(self.memory_mb),
            "network_rx" => Some(self.network_rx_kb),
            "network_tx" => Some(self.network_tx_kb),
            _ => None,
        }
    }

    /// Metric names carried by every sample.
    pub const METRICS: [&'static str; 4] = ["cpu", "memory", "network_rx", "network_tx"];
}
