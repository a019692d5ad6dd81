//! Port for durable session storage.

use crate::auth::domain::Session;
use std::sync::Arc;
use thiserror::Error;

/// Storage key under which the active session is kept.
pub const SESSION_KEY: &str = "user";

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Durable single-slot session storage keyed by [`SESSION_KEY`].
pub trait SessionStore: Send + Sync {
    /// Reads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Corrupt`] when the stored value cannot be
    /// decoded.
    fn load(&self) -> SessionStoreResult<Option<Session>>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the value cannot be written.
    fn save(&self, session: &Session) -> SessionStoreResult<()>;

    /// Removes the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the value cannot be removed.
    fn clear(&self) -> SessionStoreResult<()>;
}

/// Errors returned by session stores.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The stored session is not valid JSON for [`Session`].
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),

    /// Underlying storage failure.
    #[error("session storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
