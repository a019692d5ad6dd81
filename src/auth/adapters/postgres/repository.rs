//! `PostgreSQL` repository implementation for account lookup.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::auth::{
    domain::{PhoneNumber, UserAccount, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by auth adapters.
pub type AuthPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: AuthPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuthPgPool) -> Self {
        Self { pool }
    }

    /// Registers an account whose password is hashed by the database.
    ///
    /// The hash is produced with `crypt(password, gen_salt('bf'))` so that
    /// the `check_password` function can verify it.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicatePhone`] when the phone number
    /// is taken, or [`UserRepositoryError::Persistence`] on other failures.
    pub async fn register_with_password(
        &self,
        phone: &PhoneNumber,
        password: &str,
    ) -> UserRepositoryResult<UserId> {
        let user_id = UserId::new();
        let lookup_phone = phone.clone();
        let password = password.to_owned();
        self.run_blocking(move |connection| {
            diesel::sql_query(concat!(
                "INSERT INTO users (id, phone, password_hash) ",
                "VALUES ($1, $2, crypt($3, gen_salt('bf')))",
            ))
            .bind::<diesel::sql_types::Uuid, _>(user_id.into_inner())
            .bind::<diesel::sql_types::Text, _>(lookup_phone.as_str())
            .bind::<diesel::sql_types::Text, _>(password.as_str())
            .execute(connection)
            .map_err(|err| map_insert_error(err, &lookup_phone, user_id))?;
            Ok(user_id)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> UserRepositoryResult<Option<UserAccount>> {
        let lookup_phone = phone.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::phone.eq(lookup_phone.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()> {
        let new_row = NewUserRow {
            id: account.id().into_inner(),
            phone: account.phone().as_str().to_owned(),
            password_hash: account.password_hash().to_owned(),
        };
        let phone = account.phone().clone();
        let user_id = account.id();
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, &phone, user_id))?;
            Ok(())
        })
        .await
    }
}

fn map_insert_error(err: DieselError, phone: &PhoneNumber, user_id: UserId) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info.constraint_name() == Some("users_phone_key") =>
        {
            UserRepositoryError::DuplicatePhone(phone.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateUser(user_id)
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn row_to_account(row: UserRow) -> UserRepositoryResult<UserAccount> {
    let phone = PhoneNumber::new(row.phone).map_err(UserRepositoryError::persistence)?;
    Ok(UserAccount::new(
        UserId::from_uuid(row.id),
        phone,
        row.password_hash,
    ))
}
