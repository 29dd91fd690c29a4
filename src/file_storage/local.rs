//! # Local Filesystem Backend

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::backend::StorageBackend;
use super::errors::{StorageError, StorageResult};

/// Flat directory of uploaded files
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names are single path components
    fn full_path(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(StorageError::InvalidPath(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let full_path = self.full_path(name)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        fs::write(&full_path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))
    }
}
