//! # Record Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A unique field already holds this value
    #[error("Duplicate value for field '{field}': {value}")]
    Duplicate { field: String, value: String },

    /// A referenced document does not exist
    #[error("Referenced {collection} not found: {id}")]
    MissingReference { collection: String, id: String },

    /// Lock poisoned or backend failure
    #[error("Store failure: {0}")]
    Backend(String),
}
