//! # Storage Backend Trait

use async_trait::async_trait;

use super::errors::StorageResult;

/// Backend trait for file storage.
///
/// A successful `write` means the bytes are durable under `name`.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Write data under name, replacing any previous content
    async fn write(&self, name: &str, data: &[u8]) -> StorageResult<()>;
}
