use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A detected deviation from expected metric behavior. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub service_id: String,
    /// Metric name the anomaly was observed on (`cpu`, `memory`, ... or `cost`).
    pub metric: String,
    pub observed: f64,
    pub expected: f64,
    /// Z-score for statistical, percent change for trend, spike ratio for cost.
    pub deviation: f64,
    pub kind: AnomalyKind,
}

/// Which detector produced the anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Statistical,
    Trend,
    Cost,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Statistical => "statistical",
            Self::Trend => "trend",
            Self::Cost => "cost",
        };
        f.write_str(s)
    }
}
