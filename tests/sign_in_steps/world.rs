//! Shared world state for sign-in scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::test_helpers::{FrozenClock, ScratchDir};
use async_trait::async_trait;
use chrono::Duration;
use fieldwatch::auth::{
    adapters::{
        filesystem::FileSessionStore, hashing::Argon2PasswordVerifier,
        memory::InMemoryUserRepository,
    },
    domain::{Session, UserId},
    ports::{PasswordVerifier, PasswordVerifierError},
    services::{AuthError, AuthService},
};
use rstest::fixture;

/// Argon2 verifier that counts how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingVerifier {
    inner: Argon2PasswordVerifier,
    calls: AtomicUsize,
}

impl CountingVerifier {
    /// Returns the number of password checks performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordVerifier for CountingVerifier {
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash).await
    }
}

/// Service type used by the sign-in world.
pub type SignInService =
    AuthService<InMemoryUserRepository, CountingVerifier, FileSessionStore, FrozenClock>;

/// Scenario world for sign-in behaviour tests.
pub struct SignInWorld {
    pub users: Arc<InMemoryUserRepository>,
    pub verifier: Arc<CountingVerifier>,
    pub clock: Arc<FrozenClock>,
    pub session_dir: ScratchDir,
    pub employee: Option<UserId>,
    pub last_sign_in: Option<Result<Session, AuthError>>,
}

impl SignInWorld {
    /// Creates a world with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            verifier: Arc::new(CountingVerifier::default()),
            clock: Arc::new(FrozenClock::new()),
            session_dir: ScratchDir::new("bdd-session"),
            employee: None,
            last_sign_in: None,
        }
    }

    /// Builds a service over the world's session directory, as a fresh
    /// application start would.
    ///
    /// # Errors
    ///
    /// Returns an error when the session directory cannot be opened.
    pub fn service(&self) -> Result<SignInService, eyre::Report> {
        Ok(AuthService::new(
            Arc::clone(&self.users),
            Arc::clone(&self.verifier),
            Arc::new(FileSessionStore::open(self.session_dir.path())?),
            Arc::clone(&self.clock),
            Duration::hours(12),
        ))
    }
}

impl Default for SignInWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SignInWorld {
    SignInWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
