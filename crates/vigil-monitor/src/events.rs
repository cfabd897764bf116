//! Change notifications broadcast to subscribers after each cycle and after
//! explicit dashboard actions.

use chrono::{DateTime, Utc};

use vigil_core::models::{Alert, Incident};

/// Delta events emitted on the engine's broadcast channel. Slow subscribers
/// that lag past the channel capacity miss events rather than blocking the
/// poller.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A poll cycle finished.
    PollCompleted {
        at: DateTime<Utc>,
        services: usize,
        duration_ms: u64,
    },
    AlertRaised(Alert),
    AlertResolved(Alert),
    AlertAcknowledged(Alert),
    IncidentOpened(Incident),
    IncidentUpdated(Incident),
    IncidentResolved(Incident),
    RuleChanged { rule_id: String },
    RuleDeleted { rule_id: String },
}
