use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored service as reported by the fleet-management catalog.
///
/// Services are never deleted: when one disappears from the catalog it is
/// marked [`ServiceStatus::Removed`], and [`ServiceStatus::Unknown`] covers
/// states the upstream API does not map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Project (group) this service belongs to.
    pub project_id: String,
    pub status: ServiceStatus,
    pub last_deploy: Option<DateTime<Utc>>,
    /// Base URL used for health probing, when the service exposes one.
    pub health_url: Option<String>,
    /// Latest CPU gauge, percent of one core.
    pub cpu_percent: f64,
    /// Latest memory gauge in megabytes.
    pub memory_mb: f64,
    /// Derived from probe history; 100.0 until the first probe lands.
    pub uptime_percent: f64,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of a service in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Deploying,
    Building,
    Crashed,
    Removed,
    Unknown,
}

impl ServiceStatus {
    /// States that do not violate a `status` alert rule.
    pub fn is_operational(self) -> bool {
        matches!(self, Self::Active | Self::Deploying | Self::Building)
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Deploying => "deploying",
            Self::Building => "building",
            Self::Crashed => "crashed",
            Self::Removed => "removed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "deploying" => Ok(Self::Deploying),
            "building" => Ok(Self::Building),
            "crashed" => Ok(Self::Crashed),
            "removed" => Ok(Self::Removed),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown service status: {other}")),
        }
    }
}
