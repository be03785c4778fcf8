use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use galleria_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{upload_result, ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{file_candidate, multipart_error, FILE_FIELD};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Always `"uploaded"`
    pub status: String,
    pub message: String,
    /// Format detected from the file signature (`jpeg`, `png`, `gif`, `bmp`, `webp`)
    pub format: String,
}

/// List images held by the remote store
///
/// Never fails: an unconfigured or unreachable store yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v0/images",
    tag = "images",
    responses(
        (status = 200, description = "Image identifiers in store order", body = Vec<String>)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_images"))]
pub async fn list_images(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.gatekeeper.list_images().await)
}

/// Upload image handler
///
/// Validates the first `file` part (size, extension, content type, signature)
/// and forwards it to the remote store.
#[utoipa::path(
    post,
    path = "/api/v0/images",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image forwarded to the store", body = UploadResponse),
        (status = 400, description = "Missing file, bad extension or not an image", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Content type is not an image type", body = ErrorResponse),
        (status = 502, description = "Image store rejected the upload or is unreachable", body = ErrorResponse),
        (status = 503, description = "No image store configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let mut multipart = multipart?;

    // The first `file` field is validated as it streams in; later fields are never read.
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let candidate = file_candidate(field).await?;
        let outcome = state.gatekeeper.upload(candidate).await;
        let message = outcome.message();
        let format = upload_result(outcome)?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                status: "uploaded".to_string(),
                message,
                format: format.to_string(),
            }),
        ));
    }

    Err(AppError::InvalidInput("No file provided".to_string()).into())
}
