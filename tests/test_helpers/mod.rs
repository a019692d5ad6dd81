//! Shared fixtures for integration tests.

#![allow(dead_code, reason = "each test crate uses a different subset of helpers")]

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, RwLock};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use fieldwatch::auth::{
    adapters::{hashing::hash_password, memory::InMemoryUserRepository},
    domain::{PhoneNumber, UserAccount, UserId},
    ports::UserRepository,
};
use mockable::Clock;

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FrozenClock(RwLock<DateTime<Utc>>);

impl FrozenClock {
    /// Creates a clock at 2025-03-14 09:30 UTC.
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid start instant");
        Self(RwLock::new(start))
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.write().expect("clock lock");
        *now += by;
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.read().expect("clock lock")
    }
}

/// Stores an account with an Argon2 hash of `password`.
pub async fn seed_account(users: &InMemoryUserRepository, phone: &str, password: &str) -> UserId {
    let user_id = UserId::new();
    let account = UserAccount::new(
        user_id,
        PhoneNumber::new(phone).expect("valid phone number"),
        hash_password(password).expect("hash password"),
    );
    users.store(&account).await.expect("store account");
    user_id
}

/// Unique directory under the system temp dir, removed on drop.
pub struct ScratchDir(Utf8PathBuf);

impl ScratchDir {
    /// Reserves a fresh directory path; the directory itself is not created.
    pub fn new(label: &str) -> Self {
        let base = Utf8PathBuf::from_path_buf(env::temp_dir()).expect("utf-8 temp dir");
        Self(base.join(format!("fieldwatch-it-{label}-{}", uuid::Uuid::new_v4())))
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Utf8Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        drop(std::fs::remove_dir_all(&self.0));
    }
}

/// Guard that applies a scoped environment variable update.
pub struct EnvVarGuard {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or removes each variable for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push(((*key).to_owned(), env::var(key).ok()));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
