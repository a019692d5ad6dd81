//! Port for checking a plaintext password against a stored hash.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Password check contract: `(plaintext, hash) -> bool`.
///
/// The hash algorithm belongs to the implementation. Callers treat both an
/// error and `false` as a failed check.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// Returns whether `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError>;
}

/// Errors returned by password verifiers.
#[derive(Debug, Clone, Error)]
pub enum PasswordVerifierError {
    /// The stored hash could not be parsed.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    /// The remote check could not be performed.
    #[error("password check failed: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PasswordVerifierError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
