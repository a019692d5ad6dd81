//! Port contracts for authentication.
//!
//! Ports define infrastructure-agnostic interfaces used by the auth service.

pub mod password;
pub mod session;
pub mod users;

pub use password::{PasswordVerifier, PasswordVerifierError};
pub use session::{SESSION_KEY, SessionStore, SessionStoreError, SessionStoreResult};
pub use users::{UserRepository, UserRepositoryError, UserRepositoryResult};
