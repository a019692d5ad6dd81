//! In-memory session slot.

use std::sync::{Arc, RwLock};

use crate::auth::{
    domain::Session,
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};

/// Session store holding the serialized session in memory.
///
/// The session is kept as JSON text so decoding behaves like the durable
/// stores. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw stored value, bypassing serialization.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the slot lock is poisoned.
    pub fn put_raw(&self, raw: impl Into<String>) -> SessionStoreResult<()> {
        let mut slot = self.slot.write().map_err(|err| poisoned(&err))?;
        *slot = Some(raw.into());
        Ok(())
    }
}

fn poisoned(err: &impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::io(std::io::Error::other(err.to_string()))
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> SessionStoreResult<Option<Session>> {
        let slot = self.slot.read().map_err(|err| poisoned(&err))?;
        slot.as_deref()
            .map(|raw| {
                serde_json::from_str(raw).map_err(|err| SessionStoreError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let raw = serde_json::to_string(session).map_err(SessionStoreError::io)?;
        self.put_raw(raw)
    }

    fn clear(&self) -> SessionStoreResult<()> {
        let mut slot = self.slot.write().map_err(|err| poisoned(&err))?;
        *slot = None;
        Ok(())
    }
}
