//! File routes: list, multipart upload, delete, and content serving.

use axum::extract::{Multipart, Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use model::{ApiResponse, UploadedFile, paths};
use tracing::warn;

use crate::routes::error::ApiError;
use crate::services::files;
use crate::state::AppState;

/// `GET /api/files`
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<UploadedFile>>> {
    Json(ApiResponse::ok(files::list(&state).await))
}

/// `POST /api/upload`: multipart body with one `file` field.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<ApiResponse<UploadedFile>>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(paths::UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_owned();
        let mime = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "files: upload body read failed");
            ApiError::new(e.status(), e.body_text())
        })?;
        let file = files::store(&state, &name, mime.as_deref(), bytes).await?;
        let message = format!("{} uploaded successfully", file.name);
        return Ok(Json(ApiResponse::ok(file).with_message(message)));
    }
    Err(ApiError::bad_request(format!("missing multipart field `{}`", paths::UPLOAD_FIELD)))
}

/// `DELETE /api/files/{id}`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ApiResponse<()>>, ApiError> {
    files::delete(&state, &id).await?;
    Ok(Json(ApiResponse::ok_empty().with_message("File deleted successfully")))
}

/// `GET /api/files/{id}/content`: raw bytes with the stored MIME type.
pub async fn content(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let (mime, bytes) = files::content(&state, &id).await?;
    Ok(([(CONTENT_TYPE, mime)], bytes).into_response())
}

/// `GET /api/files/{id}/thumbnail`: images only.
pub async fn thumbnail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let (mime, bytes) = files::thumbnail(&state, &id).await?;
    Ok(([(CONTENT_TYPE, mime), (CACHE_CONTROL, "max-age=3600".to_owned())], bytes).into_response())
}
