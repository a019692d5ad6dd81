//! Diesel row models for account persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for account records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Sign-in phone number.
    pub phone: String,
    /// Stored password hash.
    pub password_hash: String,
}

/// Insert model for account records; `created_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Sign-in phone number.
    pub phone: String,
    /// Stored password hash.
    pub password_hash: String,
}

/// Result row of the `check_password` function call.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct PasswordMatchRow {
    /// Whether the password matched the hash.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub matches: bool,
}
