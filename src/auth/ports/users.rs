//! Repository port for user account lookup.

use crate::auth::domain::{PhoneNumber, UserAccount, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// Credential store contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds the single account registered under a phone number.
    ///
    /// Returns `None` when no account uses the number.
    async fn find_by_phone(&self, phone: &PhoneNumber) -> UserRepositoryResult<Option<UserAccount>>;

    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicatePhone`] when the phone number
    /// is already registered.
    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// An account with the same phone number already exists.
    #[error("phone number already registered: {0}")]
    DuplicatePhone(PhoneNumber),

    /// An account with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
