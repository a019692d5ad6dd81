//! Error types for auth domain validation.

use thiserror::Error;

/// Errors returned while constructing auth domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The phone number is not 7 to 15 digits with an optional leading `+`.
    #[error("invalid phone number '{0}'")]
    InvalidPhoneNumber(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}
