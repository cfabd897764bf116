//! # vigil-storage
//!
//! Durable persistence for the monitoring engine: a single WAL write
//! connection, versioned migrations, natural-key upserts, an audit log, and
//! the no-op memory fallback the engine degrades to when the database can't
//! be opened.

pub mod audit;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use memory::MemoryStore;

use vigil_core::errors::{StorageError, VigilError};

/// Map any driver error message into the storage error kind.
pub(crate) fn to_storage_err(message: impl Into<String>) -> VigilError {
    VigilError::Storage(StorageError::Sqlite {
        message: message.into(),
    })
}

/// Serialize a unit enum the way serde writes it, without the quotes.
pub(crate) fn enum_to_str<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

/// Parse a unit enum from its serde string form.
pub(crate) fn enum_from_str<T: serde::de::DeserializeOwned>(
    s: &str,
) -> Result<T, VigilError> {
    serde_json::from_str(&format!("\"{s}\""))
        .map_err(|e| to_storage_err(format!("bad enum value {s:?}: {e}")))
}
