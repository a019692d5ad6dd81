//! In-memory credential store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::{
    domain::{PhoneNumber, UserAccount},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository indexed by phone number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    accounts: Arc<RwLock<HashMap<PhoneNumber, UserAccount>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> UserRepositoryResult<Option<UserAccount>> {
        let accounts = self.accounts.read().map_err(|err| poisoned(&err))?;
        Ok(accounts.get(phone).cloned())
    }

    async fn store(&self, account: &UserAccount) -> UserRepositoryResult<()> {
        let mut accounts = self.accounts.write().map_err(|err| poisoned(&err))?;
        if accounts.contains_key(account.phone()) {
            return Err(UserRepositoryError::DuplicatePhone(account.phone().clone()));
        }
        if accounts.values().any(|existing| existing.id() == account.id()) {
            return Err(UserRepositoryError::DuplicateUser(account.id()));
        }
        accounts.insert(account.phone().clone(), account.clone());
        Ok(())
    }
}
