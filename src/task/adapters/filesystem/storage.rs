//! Object storage on a local directory, one sub-directory per bucket.

use async_trait::async_trait;
use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

use crate::task::{
    domain::ObjectPath,
    ports::{ImageStorage, ImageStorageError, ImageStorageResult},
};

/// Image storage writing objects beneath `<root>/<bucket>/`.
///
/// Public URLs follow `<public_base_url>/storage/v1/object/public/<bucket>/<path>`,
/// the layout served by the static file front end.
#[derive(Debug, Clone)]
pub struct FileImageStorage {
    bucket_dir: Arc<Dir>,
    bucket: String,
    public_base_url: String,
}

impl FileImageStorage {
    /// Opens (creating if needed) the bucket directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStorageError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(
        root: &Utf8Path,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> ImageStorageResult<Self> {
        let bucket = bucket.into();
        let bucket_path = root.join(&bucket);
        Dir::create_ambient_dir_all(&bucket_path, ambient_authority())
            .map_err(ImageStorageError::io)?;
        let bucket_dir =
            Dir::open_ambient_dir(&bucket_path, ambient_authority()).map_err(ImageStorageError::io)?;
        Ok(Self {
            bucket_dir: Arc::new(bucket_dir),
            bucket,
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
        })
    }
}

fn checked_relative(path: &ObjectPath) -> ImageStorageResult<&Utf8Path> {
    let relative = Utf8Path::new(path.as_str());
    let only_normal = relative
        .components()
        .all(|component| matches!(component, Utf8Component::Normal(_)));
    if !only_normal || relative.file_name().is_none() {
        return Err(ImageStorageError::InvalidPath(path.to_string()));
    }
    Ok(relative)
}

#[async_trait]
impl ImageStorage for FileImageStorage {
    async fn upload(&self, path: &ObjectPath, bytes: &[u8]) -> ImageStorageResult<()> {
        let relative = checked_relative(path)?.to_owned();
        let bucket_dir = Arc::clone(&self.bucket_dir);
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || {
            if let Some(parent) = relative.parent().filter(|parent| !parent.as_str().is_empty()) {
                bucket_dir
                    .create_dir_all(parent)
                    .map_err(ImageStorageError::io)?;
            }
            bucket_dir
                .write(&relative, bytes)
                .map_err(ImageStorageError::io)
        })
        .await
        .map_err(ImageStorageError::io)?
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.public_base_url, self.bucket
        )
    }
}
