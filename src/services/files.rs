//! File service: upload, list, delete, and content lookup.
//!
//! Uploaded bytes are kept in memory next to their metadata. Content and
//! thumbnail URLs always point back at this server, and only image types
//! ever get a thumbnail.

use axum::body::Bytes;
use model::{UploadedFile, paths};
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, StoredFile, now_ms};

pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("file is {size} bytes; limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("file name must not be empty")]
    EmptyName,
}

/// All files, oldest upload first.
pub async fn list(state: &AppState) -> Vec<UploadedFile> {
    let mut files: Vec<_> = state.store.read().await.files.iter().map(|f| f.meta.clone()).collect();
    files.sort_by_key(|f| f.uploaded_at);
    files
}

/// Store an upload and return its metadata.
///
/// # Errors
///
/// Returns [`FileError::EmptyName`] for a blank name, or
/// [`FileError::TooLarge`] when `bytes` exceeds the configured limit.
pub async fn store(state: &AppState, name: &str, mime: Option<&str>, bytes: Bytes) -> Result<UploadedFile, FileError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FileError::EmptyName);
    }
    let limit = state.config.max_upload_bytes;
    if bytes.len() > limit {
        return Err(FileError::TooLarge { size: bytes.len(), limit });
    }

    let id = Uuid::new_v4().to_string();
    let mime_type = mime.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(FALLBACK_MIME);
    let meta = UploadedFile {
        id: id.clone(),
        name: name.to_owned(),
        mime_type: mime_type.to_owned(),
        size: bytes.len() as u64,
        uploaded_at: now_ms(),
        url: paths::file_content(&id),
        thumbnail_url: Some(paths::file_thumbnail(&id)),
    }
    .normalized();

    state.store.write().await.files.push(StoredFile { meta: meta.clone(), bytes });
    info!(%id, name = %meta.name, size = meta.size, mime = %meta.mime_type, "files: stored upload");
    Ok(meta)
}

/// Remove a file by id.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] if no file has that id.
pub async fn delete(state: &AppState, id: &str) -> Result<(), FileError> {
    let mut store = state.store.write().await;
    let before = store.files.len();
    store.files.retain(|f| f.meta.id != id);
    if store.files.len() == before {
        return Err(FileError::NotFound(id.to_owned()));
    }
    info!(%id, "files: deleted");
    Ok(())
}

/// MIME type and bytes of a stored file.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] if no file has that id.
pub async fn content(state: &AppState, id: &str) -> Result<(String, Bytes), FileError> {
    let store = state.store.read().await;
    store
        .files
        .iter()
        .find(|f| f.meta.id == id)
        .map(|f| (f.meta.mime_type.clone(), f.bytes.clone()))
        .ok_or_else(|| FileError::NotFound(id.to_owned()))
}

/// Preview bytes for an image file. Images preview themselves.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] if the file is missing or not an image.
pub async fn thumbnail(state: &AppState, id: &str) -> Result<(String, Bytes), FileError> {
    let (mime, bytes) = content(state, id).await?;
    if !model::is_image_type(&mime) {
        return Err(FileError::NotFound(id.to_owned()));
    }
    Ok((mime, bytes))
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
