//! Upload handler
//!
//! `multipart/form-data` with one or more `file` fields, checked against the
//! route's rules and stored on local disk.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chat_common::AppError;
use chat_service::services::{FileRoute, IncomingFile, UploadService, UploadedFile};

use crate::extractors::CurrentProfile;
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Form field carrying the file
pub const FILE_FIELD: &str = "file";

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text()).into()
    } else {
        ApiError::invalid_body(e.body_text())
    }
}

/// POST /api/uploadthing/{route}
pub async fn upload(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(route): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<Vec<UploadedFile>>>> {
    let route: FileRoute = route.parse()?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        files.push(IncomingFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let stored = UploadService::new(state.service_context())
        .upload(&profile, route, files)
        .await?;
    Ok(Created(Json(stored)))
}
