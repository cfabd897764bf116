/// Storage-layer errors for SQLite operations. These never propagate past
/// the persistence boundary during a poll cycle.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("durable store unavailable: {reason}")]
    Unavailable { reason: String },
}
