//! Object storage port for task photos.

use crate::task::domain::ObjectPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for image storage operations.
pub type ImageStorageResult<T> = Result<T, ImageStorageError>;

/// Object storage contract: upload bytes, then resolve a public URL.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Writes `bytes` at `path`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStorageError`] when the object cannot be written.
    async fn upload(&self, path: &ObjectPath, bytes: &[u8]) -> ImageStorageResult<()>;

    /// Returns the public URL for `path`. The object need not exist.
    fn public_url(&self, path: &ObjectPath) -> String;
}

/// Errors returned by image storage implementations.
#[derive(Debug, Clone, Error)]
pub enum ImageStorageError {
    /// The path escapes the bucket or is otherwise unusable.
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl ImageStorageError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
