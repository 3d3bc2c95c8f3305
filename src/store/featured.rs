//! Featured registry storage trait.

use async_trait::async_trait;
use ulid::Ulid;

use crate::post::FeaturedEntry;

use super::error::StorageResult;

/// Storage interface for the featured-post registry.
#[async_trait]
pub trait FeaturedStore: Send + Sync {
    /// All entries, newest first.
    async fn list(&self) -> StorageResult<Vec<FeaturedEntry>>;

    /// Load the entry referencing a post, if any.
    async fn find_by_post(&self, post_id: Ulid) -> StorageResult<Option<FeaturedEntry>>;

    /// Create or update an entry (upsert semantics).
    async fn save(&self, entry: &FeaturedEntry) -> StorageResult<()>;

    /// Delete an entry by its own id.
    ///
    /// No-op if the entry doesn't exist.
    async fn delete(&self, id: Ulid) -> StorageResult<()>;

    /// Delete the entry referencing a post, if any.
    async fn delete_by_post(&self, post_id: Ulid) -> StorageResult<()>;
}
