//! Sign-in, session restore, and sign-out orchestration.

use crate::auth::{
    domain::{PhoneNumber, Session},
    ports::{
        PasswordVerifier, SessionStore, SessionStoreError, UserRepository, UserRepositoryError,
    },
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message shown to end users for any credential failure.
const GENERIC_SIGN_IN_FAILURE: &str = "Invalid phone number or password";

/// Service-level errors for authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account is registered for the phone number. Malformed numbers
    /// land here too since no account can hold one.
    #[error("user not found: {0}")]
    UserNotFound(String),
    /// The password check errored or returned `false`.
    #[error("invalid password")]
    InvalidPassword,
    /// Account lookup failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Session persistence failed.
    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}

impl AuthError {
    /// Returns the message to surface to the end user.
    ///
    /// Credential failures share one message so the response does not
    /// reveal whether a phone number is registered.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) | Self::InvalidPassword => GENERIC_SIGN_IN_FAILURE,
            Self::Repository(_) | Self::SessionStore(_) => "Failed to sign in. Please try again",
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication orchestration service.
#[derive(Clone)]
pub struct AuthService<U, P, S, C>
where
    U: UserRepository,
    P: PasswordVerifier,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    verifier: Arc<P>,
    sessions: Arc<S>,
    clock: Arc<C>,
    session_ttl: Duration,
}

impl<U, P, S, C> AuthService<U, P, S, C>
where
    U: UserRepository,
    P: PasswordVerifier,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(
        users: Arc<U>,
        verifier: Arc<P>,
        sessions: Arc<S>,
        clock: Arc<C>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            verifier,
            sessions,
            clock,
            session_ttl,
        }
    }

    /// Authenticates by phone number and password and persists the session.
    ///
    /// The password is only checked once an account has been found for the
    /// phone number. Failures fall into exactly two classes: unknown phone
    /// or invalid password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] when no account matches,
    /// [`AuthError::InvalidPassword`] when the password is empty or the
    /// check fails or errors, and repository or session-store errors
    /// otherwise.
    pub async fn sign_in(&self, phone: &str, password: &str) -> AuthResult<Session> {
        let Ok(phone) = PhoneNumber::new(phone) else {
            info!(phone, "sign-in rejected: malformed phone number");
            return Err(AuthError::UserNotFound(phone.to_owned()));
        };

        let account = self
            .users
            .find_by_phone(&phone)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(phone.as_str().to_owned()))
            .inspect_err(|_| info!(%phone, "sign-in rejected: unknown phone number"))?;

        let matches = if password.is_empty() {
            false
        } else {
            match self.verifier.verify(password, account.password_hash()).await {
                Ok(matches) => matches,
                Err(err) => {
                    warn!(?err, user_id = %account.id(), "password check failed;");
                    false
                }
            }
        };
        if !matches {
            info!(user_id = %account.id(), "sign-in rejected: invalid password");
            return Err(AuthError::InvalidPassword);
        }

        let session = Session::issue(
            account.id(),
            account.phone().clone(),
            self.session_ttl,
            &*self.clock,
        );
        self.sessions.save(&session)?;
        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Restores the persisted session, if one exists and has not expired.
    ///
    /// An expired session is cleared from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] when the store cannot be read or
    /// cleared.
    pub fn restore(&self) -> AuthResult<Option<Session>> {
        let Some(session) = self.sessions.load()? else {
            return Ok(None);
        };
        if session.is_expired(&*self.clock) {
            debug!(user_id = %session.user_id, "stored session expired");
            self.sessions.clear()?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Clears the persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] when the store cannot be cleared.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.sessions.clear()?;
        info!("signed out");
        Ok(())
    }
}
