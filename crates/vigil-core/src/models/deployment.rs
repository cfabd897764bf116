use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deployment reported by the fleet-management API, shown on service
/// detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub service_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
