//! Task photos: uploads, object paths, and stored references.

use super::{TaskDomainError, TaskId, TaskImageId};
use crate::auth::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const DEFAULT_EXTENSION: &str = "bin";
const MAX_EXTENSION_LEN: usize = 8;

/// A photo selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Creates an upload from the original file name and content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyImage`] when `bytes` is empty.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, TaskDomainError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(TaskDomainError::EmptyImage(file_name));
        }
        Ok(Self { file_name, bytes })
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the image content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the lower-cased file extension, or `bin` when the name has
    /// no usable extension.
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.bytes().all(|byte| byte.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned())
    }

    /// Returns the storage path `{owner}/{task}/{sha256}.{ext}`.
    ///
    /// Identical content uploaded for the same task maps to the same path.
    #[must_use]
    pub fn object_path(&self, owner: UserId, task_id: TaskId) -> ObjectPath {
        let digest = Sha256::digest(&self.bytes);
        let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        ObjectPath(format!("{owner}/{task_id}/{hex}.{}", self.extension()))
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Relative object-storage path of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored reference from a task to a publicly reachable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskImage {
    id: TaskImageId,
    task_id: TaskId,
    image_url: String,
    created_at: DateTime<Utc>,
}

impl TaskImage {
    /// Creates a new image reference.
    #[must_use]
    pub fn new(task_id: TaskId, image_url: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskImageId::new(),
            task_id,
            image_url: image_url.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an image reference from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: TaskImageId,
        task_id: TaskId,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            image_url,
            created_at,
        }
    }

    /// Returns the reference identifier.
    #[must_use]
    pub const fn id(&self) -> TaskImageId {
        self.id
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the public URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
