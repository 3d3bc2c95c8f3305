//! Image hosting abstraction.
//!
//! Thumbnails and standalone uploads go through the [`ImageStore`] trait:
//! `upload` takes a local file path and returns a durable URL plus an opaque
//! deletion handle, `destroy` deletes by handle. The `local` backend keeps
//! files under a media directory for self-hosted deployments; the `http`
//! backend talks to a remote hosting API.

mod error;
mod http;
mod local;

pub use error::ImageStoreError;
pub use http::HttpImageStore;
pub use local::LocalImageStore;

use std::path::Path;

use async_trait::async_trait;

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Publicly reachable URL for the stored image.
    pub url: String,
    /// Handle to pass back to [`ImageStore::destroy`].
    pub deletion_handle: String,
}

/// Whether the store confirmed a deletion.
///
/// Hosting services report deletion as a result string rather than an error;
/// anything other than a confirmed deletion is surfaced here so callers can
/// decide whether to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotConfirmed(String),
}

/// Storage interface for externally hosted images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload the file at `path` and return its URL and deletion handle.
    async fn upload(&self, path: &Path) -> Result<UploadedImage, ImageStoreError>;

    /// Delete a previously uploaded image by handle.
    async fn destroy(&self, handle: &str) -> Result<DeleteOutcome, ImageStoreError>;
}
