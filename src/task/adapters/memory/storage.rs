//! In-memory object storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::ObjectPath,
    ports::{ImageStorage, ImageStorageError, ImageStorageResult},
};

/// Object storage keeping uploads in a map. Clones share contents.
#[derive(Debug, Clone)]
pub struct InMemoryImageStorage {
    base_url: String,
    objects: Arc<RwLock<HashMap<ObjectPath, Vec<u8>>>>,
}

impl InMemoryImageStorage {
    /// Creates an empty store whose public URLs start with `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            objects: Arc::default(),
        }
    }

    /// Returns the stored bytes at `path`, if any.
    #[must_use]
    pub fn object(&self, path: &ObjectPath) -> Option<Vec<u8>> {
        self.objects
            .read()
            .ok()
            .and_then(|objects| objects.get(path).cloned())
    }

    /// Returns the number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().map_or(0, |objects| objects.len())
    }

    /// Returns `true` when nothing has been uploaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(&self, path: &ObjectPath, bytes: &[u8]) -> ImageStorageResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|err| ImageStorageError::io(std::io::Error::other(err.to_string())))?;
        objects.insert(path.clone(), bytes.to_vec());
        Ok(())
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!("{}/{path}", self.base_url)
    }
}
