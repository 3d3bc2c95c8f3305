//! Post service: orchestrates post storage, the featured registry, and the
//! image store.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::image::{DeleteOutcome, ImageStore, UploadedImage};
use crate::post::{
    FEATURED_POST_COUNT, FeaturedEntry, Post, PostError, RELATED_POST_COUNT, Thumbnail,
};
use crate::store::{FeaturedStore, PostStore};

/// Input fields shared by create and update.
///
/// Update overwrites every field wholesale; there are no partial-update
/// semantics.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub meta: String,
    pub content: String,
    pub slug: String,
    pub author: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// Service implementing the post lifecycle.
///
/// Owns the featured registry: callers never touch `FeaturedStore` directly,
/// registration happens through the featured flag on create/update and the
/// registry is pruned to [`FEATURED_POST_COUNT`] entries before the
/// triggering call returns.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    featured: Arc<dyn FeaturedStore>,
    images: Arc<dyn ImageStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        featured: Arc<dyn FeaturedStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            posts,
            featured,
            images,
        }
    }

    /// Create a post, optionally uploading a thumbnail from `file`.
    ///
    /// The slug must not already be in use. The uniqueness check is a
    /// read-before-write; concurrent creates with the same slug can race.
    pub async fn create(&self, draft: PostDraft, file: Option<&Path>) -> Result<Post, PostError> {
        if self.posts.find_by_slug(&draft.slug).await?.is_some() {
            return Err(PostError::DuplicateSlug);
        }

        let featured = draft.featured;
        let mut post = Post {
            id: Ulid::new(),
            title: draft.title,
            meta: draft.meta,
            content: draft.content,
            slug: draft.slug,
            author: draft.author,
            tags: draft.tags,
            thumbnail: None,
            created_at: Utc::now(),
        };

        if let Some(path) = file {
            post.thumbnail = Some(self.upload_thumbnail(path).await?);
        }

        self.posts.save(&post).await?;

        if featured {
            self.add_to_featured(post.id).await?;
        }

        debug!(post_id = %post.id, slug = %post.slug, "Created post");
        Ok(post)
    }

    /// Overwrite a post's fields, optionally replacing its thumbnail.
    ///
    /// When a replacement file is supplied and an old thumbnail exists, the
    /// old image is deleted first; a deletion the store does not confirm
    /// aborts the whole update.
    pub async fn update(
        &self,
        id: Ulid,
        draft: PostDraft,
        file: Option<&Path>,
    ) -> Result<Post, PostError> {
        let mut post = self.posts.load(id).await?.ok_or(PostError::NotFound)?;

        if file.is_some()
            && let Some(thumbnail) = &post.thumbnail
        {
            self.destroy_confirmed(&thumbnail.deletion_handle).await?;
        }

        if let Some(path) = file {
            post.thumbnail = Some(self.upload_thumbnail(path).await?);
        }

        post.title = draft.title;
        post.meta = draft.meta;
        post.content = draft.content;
        post.slug = draft.slug;
        post.author = draft.author;
        post.tags = draft.tags;

        if draft.featured {
            self.add_to_featured(post.id).await?;
        } else {
            self.remove_from_featured(post.id).await?;
        }

        self.posts.save(&post).await?;

        debug!(post_id = %post.id, slug = %post.slug, "Updated post");
        Ok(post)
    }

    /// Delete a post, its thumbnail, and its featured entry.
    ///
    /// The remote thumbnail goes first; if its deletion is not confirmed the
    /// post record is left untouched.
    pub async fn delete(&self, id: Ulid) -> Result<(), PostError> {
        let post = self.posts.load(id).await?.ok_or(PostError::NotFound)?;

        if let Some(thumbnail) = &post.thumbnail {
            self.destroy_confirmed(&thumbnail.deletion_handle).await?;
        }

        self.posts.delete(id).await?;
        self.remove_from_featured(id).await?;

        debug!(post_id = %id, "Deleted post");
        Ok(())
    }

    /// Fetch a post by slug along with whether it is currently featured.
    pub async fn get_by_slug(&self, slug: &str) -> Result<(Post, bool), PostError> {
        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or(PostError::NotFound)?;
        let featured = self.featured.find_by_post(post.id).await?.is_some();
        Ok((post, featured))
    }

    /// A newest-first page of posts plus the total post count.
    pub async fn list(&self, page_no: usize, limit: usize) -> Result<(Vec<Post>, usize), PostError> {
        let posts = self.posts.page(page_no.saturating_mul(limit), limit).await?;
        let count = self.posts.count().await?;
        Ok((posts, count))
    }

    /// Case-insensitive substring search over titles.
    pub async fn search(&self, title: &str) -> Result<Vec<Post>, PostError> {
        if title.trim().is_empty() {
            return Err(PostError::InvalidRequest(
                "search query is missing".to_string(),
            ));
        }
        Ok(self.posts.search_title(title).await?)
    }

    /// Up to [`RELATED_POST_COUNT`] other posts sharing a tag with `id`.
    pub async fn related(&self, id: Ulid) -> Result<Vec<Post>, PostError> {
        let post = self.posts.load(id).await?.ok_or(PostError::NotFound)?;
        Ok(self
            .posts
            .related(&post.tags, post.id, RELATED_POST_COUNT)
            .await?)
    }

    /// The featured posts, newest first.
    pub async fn featured_posts(&self) -> Result<Vec<Post>, PostError> {
        let entries = self.featured.list().await?;
        let mut posts = Vec::new();
        for entry in entries.into_iter().take(FEATURED_POST_COUNT) {
            match self.posts.load(entry.post_id).await? {
                Some(post) => posts.push(post),
                // A crash between post deletion and registry cleanup can
                // leave a dangling entry; skip it.
                None => warn!(post_id = %entry.post_id, "Featured entry references missing post"),
            }
        }
        Ok(posts)
    }

    /// Upload a standalone image.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadedImage, PostError> {
        Ok(self.images.upload(path).await?)
    }

    async fn upload_thumbnail(&self, path: &Path) -> Result<Thumbnail, PostError> {
        let uploaded = self.images.upload(path).await?;
        Ok(Thumbnail {
            url: uploaded.url,
            deletion_handle: uploaded.deletion_handle,
        })
    }

    /// Delete a remote image, failing unless the store confirms removal.
    async fn destroy_confirmed(&self, handle: &str) -> Result<(), PostError> {
        match self.images.destroy(handle).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::NotConfirmed(reason) => Err(PostError::ThumbnailCleanup(reason)),
        }
    }

    /// Register a post in the featured registry and prune to the cap.
    ///
    /// Re-registering an already-featured post is a no-op. Pruning is
    /// awaited, so the cap holds once this returns; individual prune
    /// failures are logged and skipped.
    async fn add_to_featured(&self, post_id: Ulid) -> Result<(), PostError> {
        if self.featured.find_by_post(post_id).await?.is_some() {
            return Ok(());
        }

        self.featured.save(&FeaturedEntry::new(post_id)).await?;

        let entries = self.featured.list().await?;
        for entry in entries.iter().skip(FEATURED_POST_COUNT) {
            if let Err(e) = self.featured.delete(entry.id).await {
                warn!(entry_id = %entry.id, error = %e, "Failed to prune featured entry");
            }
        }
        Ok(())
    }

    async fn remove_from_featured(&self, post_id: Ulid) -> Result<(), PostError> {
        Ok(self.featured.delete_by_post(post_id).await?)
    }
}
