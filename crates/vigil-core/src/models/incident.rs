use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Severity;

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Investigating,
    Resolved,
}

/// Kind of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentEventKind {
    Opened,
    AlertFired,
    AlertAcknowledged,
    AlertResolved,
}

/// Ordered, append-only timeline entry attached to an incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: IncidentEventKind,
    pub message: String,
    pub alert_id: Option<String>,
    pub service_id: Option<String>,
}

/// A group of correlated alerts treated as one operational unit.
///
/// Severity always equals the maximum severity among constituent alerts.
/// Auto-resolves when every constituent alert is resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub status: IncidentStatus,
    pub severity: Severity,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub alert_ids: Vec<String>,
    pub affected_services: Vec<String>,
    pub timeline: Vec<IncidentEvent>,
    pub summary: Option<String>,
}

impl Incident {
    /// Timestamp of the most recent timeline entry, falling back to start.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.timeline
            .last()
            .map(|e| e.timestamp)
            .unwrap_or(self.started_at)
    }

    pub fn is_open(&self) -> bool {
        self.status != IncidentStatus::Resolved
    }
}
