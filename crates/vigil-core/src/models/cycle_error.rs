use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the capped rolling diagnostics log. Per-service failures
/// inside a poll cycle are recorded here instead of aborting the cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleError {
    pub timestamp: DateTime<Utc>,
    /// Where the failure happened, e.g. `metrics:svc-api` or `cycle`.
    pub context: String,
    pub message: String,
}

impl CycleError {
    pub fn new(timestamp: DateTime<Utc>, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            context: context.into(),
            message: message.into(),
        }
    }
}
