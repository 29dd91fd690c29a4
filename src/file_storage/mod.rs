//! # File Storage
//!
//! Persists uploaded bytes under a caller-chosen name.

pub mod backend;
pub mod errors;
pub mod local;

pub use backend::StorageBackend;
pub use errors::{StorageError, StorageResult};
pub use local::LocalBackend;
