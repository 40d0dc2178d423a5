//! Cache error types.

use thiserror::Error;

/// Errors that can occur when talking to a key-value store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to read a value.
    #[error("Failed to read key {key}: {source}")]
    ReadError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a value.
    #[error("Failed to write key {key}: {source}")]
    WriteError {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped onto the backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
