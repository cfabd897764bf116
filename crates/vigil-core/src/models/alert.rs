use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert severity, ordered so `max()` picks the most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Which service signal a rule evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMetric {
    /// Violates on any non-operational service status.
    Status,
    /// CPU gauge vs threshold.
    Cpu,
    /// Memory gauge vs threshold.
    Memory,
    /// Violates when any recent anomaly exists for the service.
    Anomaly,
}

/// Comparison applied to gauge-style rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCondition {
    Gt,
    Lt,
    Eq,
}

impl RuleCondition {
    /// Apply the comparison to an observed value.
    pub fn matches(self, observed: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => observed > threshold,
            Self::Lt => observed < threshold,
            Self::Eq => (observed - threshold).abs() < f64::EPSILON,
        }
    }
}

/// A configurable alert rule. Mutated only through the rule CRUD surface,
/// every change audited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    pub metric: RuleMetric,
    pub condition: RuleCondition,
    pub threshold: f64,
    /// How long the condition must hold continuously before an alert fires.
    pub sustained_minutes: u32,
    pub severity: Severity,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
}

/// A raised alert. Transitions new → acknowledged → resolved, or new →
/// resolved directly when the condition clears.
///
/// Invariants: `resolved_at` is set iff `status == Resolved`, and at most one
/// non-resolved alert exists per (service_id, rule_id) pair at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub service_id: String,
    pub severity: Severity,
    pub rule_id: String,
    pub message: String,
    pub status: AlertStatus,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Whether this alert still counts against the one-active-per-pair limit.
    pub fn is_active(&self) -> bool {
        self.status != AlertStatus::Resolved
    }
}
