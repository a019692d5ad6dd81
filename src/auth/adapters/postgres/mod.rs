//! `PostgreSQL` adapters for accounts and password checks.

mod models;
mod repository;
mod schema;
mod verifier;

pub use repository::{AuthPgPool, PostgresUserRepository};
pub use verifier::PostgresPasswordVerifier;
