//! Problem-details error payloads.
//!
//! Every error response carries a small JSON body with `title`, `status`,
//! and `detail`. Validation failures (bad input, malformed ids, duplicate
//! slugs) are reported as 401 to match the API contract clients already
//! depend on.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

pub fn problem(status: StatusCode, detail: impl Into<String>) -> Response {
    let body = ProblemDetails {
        title: status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string(),
        status: status.as_u16(),
        detail: detail.into(),
    };
    (status, Json(body)).into_response()
}

pub fn invalid_request(detail: impl Into<String>) -> Response {
    problem(StatusCode::UNAUTHORIZED, detail)
}

pub fn not_found(detail: impl Into<String>) -> Response {
    problem(StatusCode::NOT_FOUND, detail)
}

pub fn internal_error(detail: impl Into<String>) -> Response {
    problem(StatusCode::INTERNAL_SERVER_ERROR, detail)
}
