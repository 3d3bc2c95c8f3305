use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::post::PostService;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: PostService,
    /// Directory where multipart uploads are spooled before hitting the
    /// image store.
    pub spool_dir: PathBuf,
}

// ============================================================================
// Server Setup
// ============================================================================

pub fn build_app(state: AppState, request_timeout_seconds: u64) -> Router {
    let api_v1 = Router::new()
        .route(
            "/posts",
            get(handlers::v1::list_posts).post(handlers::v1::create_post),
        )
        .route("/posts/featured", get(handlers::v1::featured_posts))
        .route("/posts/search", get(handlers::v1::search_posts))
        .route("/posts/related/{post_id}", get(handlers::v1::related_posts))
        .route("/posts/slug/{slug}", get(handlers::v1::get_post_by_slug))
        .route(
            "/posts/{post_id}",
            put(handlers::v1::update_post).delete(handlers::v1::delete_post),
        )
        .route("/images", post(handlers::v1::upload_image))
        .with_state(state);

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .nest("/api/v1", api_v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_seconds),
        ))
}
