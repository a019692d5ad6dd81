//! Stored user account record.

use super::{PhoneNumber, UserId};

/// Account row as held by the credential store.
///
/// The password hash is opaque to this crate; its format belongs to the
/// [`PasswordVerifier`](crate::auth::ports::PasswordVerifier) that checks it.
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    phone: PhoneNumber,
    password_hash: String,
}

impl UserAccount {
    /// Creates an account record.
    #[must_use]
    pub fn new(id: UserId, phone: PhoneNumber, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            phone,
            password_hash: password_hash.into(),
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the sign-in phone number.
    #[must_use]
    pub const fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("phone", &self.phone)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
