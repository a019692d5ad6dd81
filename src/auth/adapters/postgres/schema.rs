//! Diesel schema for account persistence.

diesel::table! {
    /// Sign-in accounts for field employees and administrators.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Sign-in phone number, unique.
        #[max_length = 20]
        phone -> Varchar,
        /// Password hash understood by `check_password`.
        password_hash -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
