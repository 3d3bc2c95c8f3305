//! Filesystem-backed image store for self-hosted deployments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use ulid::Ulid;

use super::error::ImageStoreError;
use super::{DeleteOutcome, ImageStore, UploadedImage};

/// Stores images under a media directory and builds URLs from a public base.
///
/// The deletion handle is the generated file name, so handles containing
/// path separators are rejected outright.
pub struct LocalImageStore {
    media_dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(media_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            media_dir: media_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn media_url(&self, file_name: &str) -> String {
        format!(
            "{}/media/{}",
            self.public_base_url.trim_end_matches('/'),
            file_name
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, path: &Path) -> Result<UploadedImage, ImageStoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let file_name = format!("{}{}", Ulid::new(), ext);

        fs::create_dir_all(&self.media_dir).await?;
        fs::copy(path, self.media_dir.join(&file_name)).await?;

        debug!(file = %file_name, "Stored image");
        Ok(UploadedImage {
            url: self.media_url(&file_name),
            deletion_handle: file_name,
        })
    }

    async fn destroy(&self, handle: &str) -> Result<DeleteOutcome, ImageStoreError> {
        if handle.contains('/') || handle.contains('\\') {
            return Ok(DeleteOutcome::NotConfirmed(format!(
                "invalid deletion handle: {handle}"
            )));
        }

        let path = self.media_dir.join(handle);
        if !path.exists() {
            // Already gone; treat deletion as settled.
            return Ok(DeleteOutcome::Deleted);
        }

        fs::remove_file(&path).await?;
        debug!(file = %handle, "Removed image");
        Ok(DeleteOutcome::Deleted)
    }
}
