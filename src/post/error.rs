//! Post service error types.

use thiserror::Error;

use crate::image::ImageStoreError;
use crate::store::StorageError;

/// Errors that can occur in the post service.
#[derive(Debug, Error)]
pub enum PostError {
    /// Bad or missing input, including malformed post ids.
    #[error("{0}")]
    InvalidRequest(String),

    /// A post with the requested slug already exists.
    #[error("please use a unique slug")]
    DuplicateSlug,

    /// No post matched the requested id or slug.
    #[error("post not found")]
    NotFound,

    /// The image store did not confirm deletion of an existing thumbnail.
    #[error("could not remove thumbnail: {0}")]
    ThumbnailCleanup(String),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Image store error.
    #[error("image store error: {0}")]
    ImageStore(#[from] ImageStoreError),
}
