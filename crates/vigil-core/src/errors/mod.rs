//! Error types, one enum per boundary, rolled up into [`VigilError`].

mod fetch_error;
mod storage_error;

pub use fetch_error::FetchError;
pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type VigilResult<T> = Result<T, VigilError>;

/// Top-level error for the monitoring engine.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid rule: {reason}")]
    InvalidRule { reason: String },

    #[error("missing API credentials")]
    MissingCredentials,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VigilError {
    /// Helper for rule CRUD validation failures.
    pub fn invalid_rule(reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            reason: reason.into(),
        }
    }
}
