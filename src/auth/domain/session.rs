//! Authenticated session value.

use super::{PhoneNumber, UserId};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Authenticated user session.
///
/// Sessions are passed explicitly to task operations and persisted as JSON
/// by the session store. They expire `ttl` after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user.
    pub user_id: UserId,
    /// Phone number used to sign in.
    pub phone: PhoneNumber,
    /// Sign-in timestamp.
    pub issued_at: DateTime<Utc>,
    /// Instant after which the session is no longer accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issues a session for a user, valid for `ttl` from the clock's now.
    #[must_use]
    pub fn issue(user_id: UserId, phone: PhoneNumber, ttl: Duration, clock: &impl Clock) -> Self {
        let issued_at = clock.utc();
        Self {
            user_id,
            phone,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns `true` once the clock has reached the expiry instant.
    #[must_use]
    pub fn is_expired(&self, clock: &impl Clock) -> bool {
        clock.utc() >= self.expires_at
    }
}
