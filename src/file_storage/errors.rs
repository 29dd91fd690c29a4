//! # File Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
