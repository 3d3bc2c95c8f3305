//! Post domain types and the service orchestrating them.

mod error;
mod service;

pub use error::PostError;
pub use service::{PostDraft, PostService};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Maximum number of entries kept in the featured registry.
pub const FEATURED_POST_COUNT: usize = 4;

/// Maximum number of posts returned by a related-post lookup.
pub const RELATED_POST_COUNT: usize = 5;

/// A content record addressed by its unique slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Ulid,
    pub title: String,
    pub meta: String,
    pub content: String,
    pub slug: String,
    pub author: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn thumbnail_url(&self) -> Option<String> {
        self.thumbnail.as_ref().map(|t| t.url.clone())
    }
}

/// An externally hosted image attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    /// Opaque handle the image store accepts for deletion.
    pub deletion_handle: String,
}

/// A reference to a post in the bounded featured registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedEntry {
    pub id: Ulid,
    pub post_id: Ulid,
    pub created_at: DateTime<Utc>,
}

impl FeaturedEntry {
    pub fn new(post_id: Ulid) -> Self {
        Self {
            id: Ulid::new(),
            post_id,
            created_at: Utc::now(),
        }
    }
}
