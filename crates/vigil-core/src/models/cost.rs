use serde::{Deserialize, Serialize};

/// Daily cost for a project, optionally attributed to a single service.
/// Unique on (date, project_id, service_id) in the durable store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    pub project_id: String,
    pub service_id: Option<String>,
    pub amount_usd: f64,
}

/// Direction of the fitted cost trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// One point on the forecast curve: a historical actual or a projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPoint {
    pub date: String,
    pub amount_usd: f64,
    pub projected: bool,
}

/// Linear cost projection over the near term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostForecast {
    /// Historical actuals followed by projected points (clamped ≥ 0).
    pub points: Vec<CostPoint>,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub trend: CostTrend,
    /// max(0, R²) × 100, rounded.
    pub confidence: u8,
    pub predicted_7d_total: f64,
    pub predicted_30d_total: f64,
}
