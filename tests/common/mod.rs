//! Common test utilities.

use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use inkpost::image::LocalImageStore;
use inkpost::post::PostService;
use inkpost::server::{self, AppState};
use inkpost::store::file::{FileFeaturedStore, FilePostStore};

/// Create a test `AppState` backed by temp directories.
pub fn test_app_state() -> AppState {
    let tmp = TempDir::new().unwrap();

    // Leak the TempDir so it doesn't get cleaned up during the test.
    // This is fine for tests - the OS will clean up on process exit.
    let tmp = Box::leak(Box::new(tmp));

    let posts = Arc::new(FilePostStore::new(tmp.path().join("posts")));
    let featured = Arc::new(FileFeaturedStore::new(tmp.path().join("featured")));
    let images = Arc::new(LocalImageStore::new(
        tmp.path().join("media"),
        "http://localhost:8080",
    ));

    AppState {
        service: PostService::new(posts, featured, images),
        spool_dir: tmp.path().join("uploads"),
    }
}

/// Create a test app with empty state.
pub fn test_app() -> Router {
    server::build_app(test_app_state(), 30)
}

/// Create a test app and hand back its state for inspecting side effects.
pub fn test_app_with_state() -> (Router, AppState) {
    let state = test_app_state();
    (server::build_app(state.clone(), 30), state)
}

// ============================================================================
// Multipart Helpers
// ============================================================================

pub const BOUNDARY: &str = "inkpost-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Build a multipart body from text fields and an optional file part
/// (`(file_name, content_type, bytes)`), sent under the `thumbnail` field.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"thumbnail\"; filename=\"{file_name}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Standard field set for a post body.
pub fn post_fields<'a>(slug: &'a str, title: &'a str, featured: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("meta", "meta description"),
        ("content", "some content"),
        ("slug", slug),
        ("author", "admin"),
        ("tags", "rust,web"),
        ("featured", featured),
    ]
}
