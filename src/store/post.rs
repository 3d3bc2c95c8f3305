//! Post storage trait.

use async_trait::async_trait;
use ulid::Ulid;

use crate::post::Post;

use super::error::StorageResult;

/// Storage interface for post persistence.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Load a post by id.
    ///
    /// Returns `Ok(None)` if the post doesn't exist.
    async fn load(&self, id: Ulid) -> StorageResult<Option<Post>>;

    /// Load a post by slug.
    async fn find_by_slug(&self, slug: &str) -> StorageResult<Option<Post>>;

    /// Create or update a post (upsert semantics).
    async fn save(&self, post: &Post) -> StorageResult<()>;

    /// Delete a post.
    ///
    /// No-op if the post doesn't exist.
    async fn delete(&self, id: Ulid) -> StorageResult<()>;

    /// A newest-first slice of all posts.
    async fn page(&self, offset: usize, limit: usize) -> StorageResult<Vec<Post>>;

    /// Total number of stored posts.
    async fn count(&self) -> StorageResult<usize>;

    /// Posts whose title contains `query`, case-insensitively, newest first.
    async fn search_title(&self, query: &str) -> StorageResult<Vec<Post>>;

    /// Up to `limit` posts sharing at least one of `tags`, newest first,
    /// excluding the post with id `exclude`.
    async fn related(&self, tags: &[String], exclude: Ulid, limit: usize)
    -> StorageResult<Vec<Post>>;
}
