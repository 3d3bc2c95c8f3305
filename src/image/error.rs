//! Image store error types.

use thiserror::Error;

/// Errors that can occur talking to an image store backend.
#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// I/O error reading or writing image files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level error talking to a remote store.
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store returned a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The uploaded file path had no usable file name.
    #[error("invalid file path: {0}")]
    InvalidPath(String),
}
