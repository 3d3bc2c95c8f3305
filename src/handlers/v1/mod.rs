//! V1 API handlers.

mod form;
mod images;
mod posts;

pub use images::upload_image;
pub use posts::{
    create_post, delete_post, featured_posts, get_post_by_slug, list_posts, related_posts,
    search_posts, update_post,
};
