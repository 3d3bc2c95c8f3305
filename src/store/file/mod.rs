//! File-based storage implementations.
//!
//! Each entity is one pretty-printed JSON document on disk, with an
//! in-memory cache loaded at startup. Writes persist to disk first, then
//! update the cache.

mod featured;
mod post;

pub use featured::FileFeaturedStore;
pub use post::FilePostStore;

/// Outcome of loading a store's documents from disk.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    /// (path, error) pairs for documents that failed to load.
    pub errors: Vec<(String, String)>,
}
