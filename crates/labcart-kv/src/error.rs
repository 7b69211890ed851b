//! Key-value store error types.

use thiserror::Error;

/// Errors that can occur when using a key-value store.
#[derive(Error, Debug)]
pub enum KvError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    Open(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Key not found.
    #[error("Key not found: {0}")]
    NotFound(String),
}

impl KvError {
    /// Whether the error means the stored bytes exist but could not be
    /// decoded into the requested type.
    pub fn is_corrupt_value(&self) -> bool {
        matches!(self, KvError::Serialize(_))
    }
}
