//! Response types for the HTTP API.
//!
//! Each endpoint returns an explicit projection of the post record rather
//! than shaping fields ad hoc in the handler.

use serde::Serialize;

use crate::post::Post;

// ============================================================================
// Projections
// ============================================================================

/// Compact projection used by create, featured, and related responses.
#[derive(Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub author: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            meta: post.meta.clone(),
            slug: post.slug.clone(),
            thumbnail: post.thumbnail_url(),
            author: post.author.clone(),
        }
    }
}

/// List/search projection: summary plus tags and creation time.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItem {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub author: String,
    pub created_at: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostListItem {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            meta: post.meta.clone(),
            slug: post.slug.clone(),
            thumbnail: post.thumbnail_url(),
            author: post.author.clone(),
            created_at: post.created_at.to_rfc3339(),
            tags: post.tags.clone(),
        }
    }
}

/// Full projection used by update and fetch-by-slug responses.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub author: String,
    pub content: String,
    pub tags: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PostDetail {
    pub fn new(post: &Post, featured: bool) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            meta: post.meta.clone(),
            slug: post.slug.clone(),
            thumbnail: post.thumbnail_url(),
            author: post.author.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            featured,
            created_at: None,
        }
    }

    /// Include the creation timestamp (fetch-by-slug only).
    pub fn with_created_at(mut self, post: &Post) -> Self {
        self.created_at = Some(post.created_at.to_rfc3339());
        self
    }
}

// ============================================================================
// Response Envelopes
// ============================================================================

#[derive(Serialize)]
pub struct PostResponse {
    pub post: PostSummary,
}

#[derive(Serialize)]
pub struct PostDetailResponse {
    pub post: PostDetail,
}

#[derive(Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostListItem>,
    pub post_count: usize,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub posts: Vec<PostListItem>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ImageResponse {
    pub image: String,
}
