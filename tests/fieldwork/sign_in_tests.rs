//! Sign-in flows with a filesystem session store.

use std::sync::Arc;

use crate::test_helpers::{FrozenClock, ScratchDir, seed_account};
use chrono::Duration;
use fieldwatch::auth::{
    adapters::{
        filesystem::FileSessionStore, hashing::Argon2PasswordVerifier,
        memory::InMemoryUserRepository,
    },
    ports::{SESSION_KEY, SessionStore},
    services::{AuthError, AuthService},
};
use rstest::rstest;

type FileAuthService =
    AuthService<InMemoryUserRepository, Argon2PasswordVerifier, FileSessionStore, FrozenClock>;

fn service(
    users: &Arc<InMemoryUserRepository>,
    dir: &ScratchDir,
    clock: &Arc<FrozenClock>,
) -> FileAuthService {
    AuthService::new(
        Arc::clone(users),
        Arc::new(Argon2PasswordVerifier::new()),
        Arc::new(FileSessionStore::open(dir.path()).expect("open session store")),
        Arc::clone(clock),
        Duration::hours(8),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn session_survives_a_restart() -> Result<(), eyre::Report> {
    let users = Arc::new(InMemoryUserRepository::new());
    let user_id = seed_account(&users, "9999999999", "camera-1").await;
    let dir = ScratchDir::new("restart");
    let clock = Arc::new(FrozenClock::new());

    let signed_in = service(&users, &dir, &clock)
        .sign_in("9999999999", "camera-1")
        .await?;
    eyre::ensure!(signed_in.user_id == user_id, "session user mismatch");
    eyre::ensure!(
        dir.path().join(SESSION_KEY).is_file(),
        "session should be written under the user key"
    );

    let restored = service(&users, &dir, &clock).restore()?;
    eyre::ensure!(restored == Some(signed_in), "restored session differs");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_session_is_discarded_on_restore() -> Result<(), eyre::Report> {
    let users = Arc::new(InMemoryUserRepository::new());
    seed_account(&users, "9999999999", "camera-1").await;
    let dir = ScratchDir::new("expiry");
    let clock = Arc::new(FrozenClock::new());
    service(&users, &dir, &clock)
        .sign_in("9999999999", "camera-1")
        .await?;

    clock.advance(Duration::hours(9));
    let restarted = service(&users, &dir, &clock);

    eyre::ensure!(restarted.restore()?.is_none(), "session should expire");
    let store = FileSessionStore::open(dir.path())?;
    eyre::ensure!(store.load()?.is_none(), "expired session should be cleared");
    Ok(())
}

#[rstest]
#[case("9999999999", "wrong-password")]
#[case("8888888888", "camera-1")]
#[tokio::test(flavor = "multi_thread")]
async fn credential_failures_share_one_message(
    #[case] phone: &str,
    #[case] password: &str,
) -> Result<(), eyre::Report> {
    let users = Arc::new(InMemoryUserRepository::new());
    seed_account(&users, "9999999999", "camera-1").await;
    let dir = ScratchDir::new("failure");
    let clock = Arc::new(FrozenClock::new());

    let err = service(&users, &dir, &clock)
        .sign_in(phone, password)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("sign-in should fail"))?;

    eyre::ensure!(
        matches!(err, AuthError::UserNotFound(_) | AuthError::InvalidPassword),
        "unexpected error: {err}"
    );
    eyre::ensure!(err.user_message() == "Invalid phone number or password");
    eyre::ensure!(
        !dir.path().join(SESSION_KEY).exists(),
        "failed sign-in must not persist a session"
    );
    Ok(())
}
