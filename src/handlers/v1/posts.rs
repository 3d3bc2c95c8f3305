//! Post management HTTP handlers.

use axum::Json;
use axum::extract::{Multipart, Path as PathExtract, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use ulid::Ulid;

use crate::api::{
    MessageResponse, PostDetail, PostDetailResponse, PostListItem, PostListResponse, PostResponse,
    PostSummary, PostsResponse, SearchResponse,
};
use crate::handlers::problem_details;
use crate::post::PostError;
use crate::server::AppState;

use super::form;

const DEFAULT_PAGE_LIMIT: usize = 10;

// ============================================================================
// Query Types
// ============================================================================

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "pageNo")]
    page_no: Option<usize>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    title: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/posts
pub async fn create_post(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match form::parse_post_form(&mut multipart, &state.spool_dir).await {
        Ok(form) => form,
        Err(e) => return error_response(e, StatusCode::UNAUTHORIZED),
    };

    let result = state.service.create(form.draft, form.file.as_deref()).await;
    form::discard_spool(form.file.as_deref()).await;

    match result {
        Ok(post) => (
            StatusCode::OK,
            Json(PostResponse {
                post: PostSummary::from(&post),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::UNAUTHORIZED),
    }
}

/// PUT /api/v1/posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    PathExtract(post_id): PathExtract<String>,
    mut multipart: Multipart,
) -> Response {
    let id = match parse_post_id(&post_id) {
        Ok(id) => id,
        Err(e) => return error_response(e, StatusCode::UNAUTHORIZED),
    };

    let form = match form::parse_post_form(&mut multipart, &state.spool_dir).await {
        Ok(form) => form,
        Err(e) => return error_response(e, StatusCode::UNAUTHORIZED),
    };

    let featured = form.draft.featured;
    let result = state
        .service
        .update(id, form.draft, form.file.as_deref())
        .await;
    form::discard_spool(form.file.as_deref()).await;

    match result {
        Ok(post) => (
            StatusCode::OK,
            Json(PostDetailResponse {
                post: PostDetail::new(&post, featured),
            }),
        )
            .into_response(),
        // A thumbnail the image store would not release blocks the update.
        Err(e) => error_response(e, StatusCode::UNAUTHORIZED),
    }
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    PathExtract(post_id): PathExtract<String>,
) -> Response {
    let id = match parse_post_id(&post_id) {
        Ok(id) => id,
        Err(e) => return error_response(e, StatusCode::NOT_FOUND),
    };

    match state.service.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Post removed successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

/// GET /api/v1/posts/slug/{slug}
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    PathExtract(slug): PathExtract<String>,
) -> Response {
    match state.service.get_by_slug(&slug).await {
        Ok((post, featured)) => (
            StatusCode::OK,
            Json(PostDetailResponse {
                post: PostDetail::new(&post, featured).with_created_at(&post),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

/// GET /api/v1/posts/featured
pub async fn featured_posts(State(state): State<AppState>) -> Response {
    match state.service.featured_posts().await {
        Ok(posts) => (
            StatusCode::OK,
            Json(PostsResponse {
                posts: posts.iter().map(PostSummary::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

/// GET /api/v1/posts?pageNo=0&limit=10
pub async fn list_posts(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let page_no = query.page_no.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    match state.service.list(page_no, limit).await {
        Ok((posts, post_count)) => (
            StatusCode::OK,
            Json(PostListResponse {
                posts: posts.iter().map(PostListItem::from).collect(),
                post_count,
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

/// GET /api/v1/posts/search?title=...
pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let title = query.title.unwrap_or_default();
    match state.service.search(&title).await {
        Ok(posts) => (
            StatusCode::OK,
            Json(SearchResponse {
                posts: posts.iter().map(PostListItem::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

/// GET /api/v1/posts/related/{post_id}
pub async fn related_posts(
    State(state): State<AppState>,
    PathExtract(post_id): PathExtract<String>,
) -> Response {
    let id = match parse_post_id(&post_id) {
        Ok(id) => id,
        Err(e) => return error_response(e, StatusCode::NOT_FOUND),
    };

    match state.service.related(id).await {
        Ok(posts) => (
            StatusCode::OK,
            Json(PostsResponse {
                posts: posts.iter().map(PostSummary::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::NOT_FOUND),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_post_id(raw: &str) -> Result<Ulid, PostError> {
    Ulid::from_string(raw).map_err(|_| PostError::InvalidRequest("invalid post id".to_string()))
}

/// Map a service error to a problem-details response.
///
/// `thumbnail_cleanup_status` varies by call site: a thumbnail the image
/// store would not release is a 404 on delete but a 401 on update.
pub(super) fn error_response(err: PostError, thumbnail_cleanup_status: StatusCode) -> Response {
    match &err {
        PostError::InvalidRequest(_) | PostError::DuplicateSlug => {
            problem_details::invalid_request(err.to_string())
        }
        PostError::NotFound => problem_details::not_found(err.to_string()),
        PostError::ThumbnailCleanup(_) => {
            problem_details::problem(thumbnail_cleanup_status, err.to_string())
        }
        PostError::Storage(_) | PostError::ImageStore(_) => {
            problem_details::internal_error(err.to_string())
        }
    }
}
