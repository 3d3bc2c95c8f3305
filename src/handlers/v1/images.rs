//! Standalone image upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::ImageResponse;
use crate::handlers::problem_details;
use crate::server::AppState;

use super::form;
use super::posts::error_response;

/// POST /api/v1/images
pub async fn upload_image(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let spooled = match form::spool_first_file(&mut multipart, &state.spool_dir).await {
        Ok(Some(path)) => path,
        Ok(None) => return problem_details::invalid_request("image file is missing"),
        Err(e) => return error_response(e, StatusCode::UNAUTHORIZED),
    };

    let result = state.service.upload_image(&spooled).await;
    form::discard_spool(Some(spooled.as_path())).await;

    match result {
        Ok(uploaded) => (
            StatusCode::CREATED,
            Json(ImageResponse {
                image: uploaded.url,
            }),
        )
            .into_response(),
        Err(e) => error_response(e, StatusCode::UNAUTHORIZED),
    }
}
