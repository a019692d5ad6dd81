//! Password verification delegated to the database `check_password` function.

use super::{models::PasswordMatchRow, repository::AuthPgPool};
use crate::auth::ports::{PasswordVerifier, PasswordVerifierError};
use async_trait::async_trait;
use diesel::prelude::*;

/// Calls `check_password(user_password, hash)` and returns its boolean.
#[derive(Debug, Clone)]
pub struct PostgresPasswordVerifier {
    pool: AuthPgPool,
}

impl PostgresPasswordVerifier {
    /// Creates a verifier from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuthPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordVerifier for PostgresPasswordVerifier {
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        let pool = self.pool.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PasswordVerifierError::backend)?;
            let row = diesel::sql_query("SELECT check_password($1, $2) AS matches")
                .bind::<diesel::sql_types::Text, _>(password.as_str())
                .bind::<diesel::sql_types::Text, _>(hash.as_str())
                .get_result::<PasswordMatchRow>(&mut connection)
                .map_err(PasswordVerifierError::backend)?;
            Ok(row.matches)
        })
        .await
        .map_err(PasswordVerifierError::backend)?
    }
}
