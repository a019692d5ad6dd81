//! Session store persisting the `user` key as a JSON file.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::auth::{
    domain::Session,
    ports::{SESSION_KEY, SessionStore, SessionStoreError, SessionStoreResult},
};

const STAGING_FILE: &str = "user.tmp";

/// Durable session store rooted in a capability directory.
///
/// The session lives in a file named [`SESSION_KEY`]. Writes go to a
/// staging file first and are renamed into place.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
}

impl FileSessionStore {
    /// Opens (creating if needed) the session directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> SessionStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(SessionStoreError::io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(SessionStoreError::io)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionStoreResult<Option<Session>> {
        match self.dir.read_to_string(SESSION_KEY) {
            Ok(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| SessionStoreError::Corrupt(err.to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SessionStoreError::io(err)),
        }
    }

    fn save(&self, session: &Session) -> SessionStoreResult<()> {
        let raw = serde_json::to_vec(session).map_err(SessionStoreError::io)?;
        self.dir
            .write(STAGING_FILE, raw)
            .map_err(SessionStoreError::io)?;
        self.dir
            .rename(STAGING_FILE, &self.dir, SESSION_KEY)
            .map_err(SessionStoreError::io)
    }

    fn clear(&self) -> SessionStoreResult<()> {
        match self.dir.remove_file(SESSION_KEY) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(SessionStoreError::io(err)),
            _ => Ok(()),
        }
    }
}
