//! Featured registry persistence to JSON documents.
//!
//! Stores entries in `<data>/featured/{id}.json` with an in-memory cache.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::post::FeaturedEntry;
use crate::store::error::StorageResult;
use crate::store::featured::FeaturedStore;

use super::LoadReport;

/// File-backed featured registry store.
#[derive(Clone)]
pub struct FileFeaturedStore {
    inner: Arc<RwLock<HashMap<Ulid, FeaturedEntry>>>,
    featured_path: PathBuf,
}

impl FileFeaturedStore {
    /// Create a new store rooted at the given directory.
    pub fn new(featured_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            featured_path: featured_path.into(),
        }
    }

    /// Load all entry documents from disk.
    pub async fn load_all(&self) -> StorageResult<LoadReport> {
        if !self.featured_path.exists() {
            fs::create_dir_all(&self.featured_path).await?;
            return Ok(LoadReport::default());
        }

        let mut report = LoadReport::default();
        let mut entries = fs::read_dir(&self.featured_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read featured entry");
                    report.errors.push((path.display().to_string(), e.to_string()));
                    continue;
                }
            };

            match serde_json::from_str::<FeaturedEntry>(&content) {
                Ok(parsed) => {
                    let mut inner = self.inner.write().await;
                    inner.insert(parsed.id, parsed);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse featured entry");
                    report.errors.push((path.display().to_string(), e.to_string()));
                }
            }
        }

        if report.loaded > 0 {
            info!(loaded = report.loaded, errors = report.errors.len(), "Loaded featured entries");
        }

        Ok(report)
    }

    fn entry_path(&self, id: Ulid) -> PathBuf {
        self.featured_path.join(format!("{id}.json"))
    }
}

#[async_trait]
impl FeaturedStore for FileFeaturedStore {
    async fn list(&self) -> StorageResult<Vec<FeaturedEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<FeaturedEntry> = inner.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    async fn find_by_post(&self, post_id: Ulid) -> StorageResult<Option<FeaturedEntry>> {
        let inner = self.inner.read().await;
        Ok(inner.values().find(|e| e.post_id == post_id).cloned())
    }

    async fn save(&self, entry: &FeaturedEntry) -> StorageResult<()> {
        fs::create_dir_all(&self.featured_path).await?;
        let content = serde_json::to_vec_pretty(entry)?;
        fs::write(self.entry_path(entry.id), content).await?;

        let mut inner = self.inner.write().await;
        inner.insert(entry.id, entry.clone());

        debug!(entry_id = %entry.id, post_id = %entry.post_id, "Saved featured entry");
        Ok(())
    }

    async fn delete(&self, id: Ulid) -> StorageResult<()> {
        // Remove the document first; if that fails the cache still agrees
        // with what a restart would reload.
        let path = self.entry_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }

        let mut inner = self.inner.write().await;
        inner.remove(&id);

        debug!(entry_id = %id, "Deleted featured entry");
        Ok(())
    }

    async fn delete_by_post(&self, post_id: Ulid) -> StorageResult<()> {
        let entry = self.find_by_post(post_id).await?;
        if let Some(entry) = entry {
            self.delete(entry.id).await?;
        }
        Ok(())
    }
}
