//! Post persistence to JSON documents.
//!
//! Stores posts in `<data>/posts/{id}.json` with an in-memory cache.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::post::Post;
use crate::store::error::{StorageError, StorageResult};
use crate::store::post::PostStore;

use super::LoadReport;

/// Newest first, id as tie-break so the order is total.
pub(super) fn newest_first(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// File-backed post store.
#[derive(Clone)]
pub struct FilePostStore {
    inner: Arc<RwLock<HashMap<Ulid, Post>>>,
    posts_path: PathBuf,
}

impl FilePostStore {
    /// Create a new store rooted at the given directory.
    pub fn new(posts_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            posts_path: posts_path.into(),
        }
    }

    /// Load all post documents from disk.
    ///
    /// Call this on startup to populate the cache.
    pub async fn load_all(&self) -> StorageResult<LoadReport> {
        if !self.posts_path.exists() {
            fs::create_dir_all(&self.posts_path).await?;
            return Ok(LoadReport::default());
        }

        let mut report = LoadReport::default();
        let mut entries = fs::read_dir(&self.posts_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            match load_document(&path).await {
                Ok(post) => {
                    let mut inner = self.inner.write().await;
                    inner.insert(post.id, post);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to load post");
                    report.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        if report.loaded > 0 {
            info!(loaded = report.loaded, errors = report.errors.len(), "Loaded posts");
        }

        Ok(report)
    }

    fn post_path(&self, id: Ulid) -> PathBuf {
        self.posts_path.join(format!("{id}.json"))
    }

    /// Persist a post to disk.
    async fn persist(&self, post: &Post) -> StorageResult<()> {
        fs::create_dir_all(&self.posts_path).await?;
        let content = serde_json::to_vec_pretty(post)?;
        fs::write(self.post_path(post.id), content).await?;
        Ok(())
    }
}

async fn load_document(path: &Path) -> StorageResult<Post> {
    let content = fs::read_to_string(path).await.map_err(StorageError::Io)?;
    let post: Post = serde_json::from_str(&content)?;
    Ok(post)
}

#[async_trait]
impl PostStore for FilePostStore {
    async fn load(&self, id: Ulid) -> StorageResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> StorageResult<Option<Post>> {
        let inner = self.inner.read().await;
        Ok(inner.values().find(|p| p.slug == slug).cloned())
    }

    async fn save(&self, post: &Post) -> StorageResult<()> {
        // Persist to disk first, then update the cache.
        self.persist(post).await?;

        let mut inner = self.inner.write().await;
        inner.insert(post.id, post.clone());

        debug!(post_id = %post.id, slug = %post.slug, "Saved post");
        Ok(())
    }

    async fn delete(&self, id: Ulid) -> StorageResult<()> {
        // Remove the document first; if that fails the cache still agrees
        // with what a restart would reload.
        let path = self.post_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }

        let mut inner = self.inner.write().await;
        inner.remove(&id);

        debug!(post_id = %id, "Deleted post");
        Ok(())
    }

    async fn page(&self, offset: usize, limit: usize) -> StorageResult<Vec<Post>> {
        let inner = self.inner.read().await;
        let mut posts: Vec<Post> = inner.values().cloned().collect();
        posts.sort_by(newest_first);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> StorageResult<usize> {
        let inner = self.inner.read().await;
        Ok(inner.len())
    }

    async fn search_title(&self, query: &str) -> StorageResult<Vec<Post>> {
        let needle = query.to_lowercase();
        let inner = self.inner.read().await;
        let mut posts: Vec<Post> = inner
            .values()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        posts.sort_by(newest_first);
        Ok(posts)
    }

    async fn related(
        &self,
        tags: &[String],
        exclude: Ulid,
        limit: usize,
    ) -> StorageResult<Vec<Post>> {
        let inner = self.inner.read().await;
        let mut posts: Vec<Post> = inner
            .values()
            .filter(|p| p.id != exclude && p.tags.iter().any(|t| tags.contains(t)))
            .cloned()
            .collect();
        posts.sort_by(newest_first);
        Ok(posts.into_iter().take(limit).collect())
    }
}
