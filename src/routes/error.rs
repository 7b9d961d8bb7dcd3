//! Envelope-shaped error responses.
//!
//! Every JSON endpoint answers with `ApiResponse<T>`. Failures still use the
//! envelope (`success: false`, `error`) but with a matching HTTP status, so
//! clients can rely on either signal.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use model::ApiResponse;

use crate::services::chat::ChatError;
use crate::services::files::FileError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse::failure(self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => Self::bad_request(err.to_string()),
            ChatError::Responder(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        let status = match err {
            FileError::NotFound(_) => StatusCode::NOT_FOUND,
            FileError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            FileError::EmptyName => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
