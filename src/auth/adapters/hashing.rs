//! Argon2 password hashing for locally managed credentials.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`). Deployments backed by
//! `PostgreSQL` verify with [`PostgresPasswordVerifier`] instead.
//!
//! [`PostgresPasswordVerifier`]: crate::auth::adapters::postgres::PostgresPasswordVerifier

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};
use async_trait::async_trait;

use crate::auth::ports::{PasswordVerifier, PasswordVerifierError};

/// Hashes a password into an Argon2id PHC string with a random salt.
///
/// # Errors
///
/// Returns [`PasswordVerifierError::MalformedHash`] when hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordVerifierError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordVerifierError::MalformedHash(err.to_string()))
}

/// Verifies passwords against Argon2 PHC hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordVerifier;

impl Argon2PasswordVerifier {
    /// Creates a verifier with default Argon2 parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordVerifier for Argon2PasswordVerifier {
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|err| PasswordVerifierError::MalformedHash(err.to_string()))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(PasswordVerifierError::backend)?
    }
}
