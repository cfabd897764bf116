use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who performed an audited mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditActor {
    System,
    /// A named dashboard or API user.
    User(String),
}

impl std::fmt::Display for AuditActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => f.write_str("system"),
            Self::User(name) => f.write_str(name),
        }
    }
}

/// Audited operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
    Acknowledge,
}

impl std::fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Acknowledge => "acknowledge",
        };
        f.write_str(s)
    }
}

/// Append-only record of a rule mutation or alert acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub entity_kind: String,
    pub entity_id: String,
    pub operation: AuditOperation,
    pub actor: AuditActor,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}
