//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each bounded by the
//! configured request timeout. Server-side (SSR): stubs returning
//! `ApiError::Unavailable` since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every response body is decoded as an `ApiResponse` envelope first, so a
//! backend rejection surfaces its own error text. Callers turn errors into
//! toasts; nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use model::{ApiResponse, ChatMessage, EnvelopeError, ProgressRecord, TodoTask, UploadedFile, paths};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("{0}")]
    Rejected(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("request timed out")]
    Timeout,
    #[error("not available on server")]
    Unavailable,
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(reason) => Self::Rejected(reason),
            EnvelopeError::MissingData => Self::Decode(EnvelopeError::MissingData.to_string()),
        }
    }
}

/// Decode an envelope body, falling back to the HTTP status when the body
/// is not an envelope.
///
/// # Errors
///
/// `Rejected` for `success: false`, `Status` for a non-2xx non-envelope
/// body, `Decode` otherwise.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => Ok(envelope.into_result()?),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status(status)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn required<T>(data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| EnvelopeError::MissingData.into())
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn with_timeout<F, T>(config: &ClientConfig, fut: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    use futures::future::{Either, select};

    let millis = u32::try_from(config.request_timeout.as_millis()).unwrap_or(u32::MAX);
    let timer = gloo_timers::future::TimeoutFuture::new(millis);
    match select(Box::pin(fut), timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

#[cfg(feature = "hydrate")]
async fn send<T: DeserializeOwned>(
    config: &ClientConfig,
    request: Result<gloo_net::http::Request, gloo_net::Error>,
) -> Result<Option<T>, ApiError> {
    let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
    with_timeout(config, async move {
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        decode_envelope(status, &body)
    })
    .await
}

async fn get<T: DeserializeOwned>(config: &ClientConfig, path: &str) -> Result<Option<T>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        send(config, gloo_net::http::Request::get(&config.url(path)).build()).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, path);
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

/// `GET /api/chat/history`
///
/// # Errors
///
/// See [`ApiError`].
pub async fn fetch_chat_history(config: &ClientConfig) -> Result<Vec<ChatMessage>, ApiError> {
    Ok(get(config, paths::CHAT_HISTORY).await?.unwrap_or_default())
}

/// `POST /api/chat`
///
/// Resolves with the assistant reply.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn send_chat_message(config: &ClientConfig, content: &str, id: &str) -> Result<ChatMessage, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = model::SendChatRequest { message: content.to_owned(), id: Some(id.to_owned()) };
        let request = gloo_net::http::Request::post(&config.url(paths::CHAT)).json(&body);
        required(send(config, request).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, content, id);
        Err(ApiError::Unavailable)
    }
}

/// `GET /api/files`
///
/// # Errors
///
/// See [`ApiError`].
pub async fn fetch_files(config: &ClientConfig) -> Result<Vec<UploadedFile>, ApiError> {
    Ok(get(config, paths::FILES).await?.unwrap_or_default())
}

/// `POST /api/upload`
///
/// Sends one file as multipart field `file`.
///
/// # Errors
///
/// See [`ApiError`].
#[cfg(feature = "hydrate")]
pub async fn upload_file(config: &ClientConfig, file: &web_sys::File) -> Result<UploadedFile, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    form.append_with_blob_and_filename(paths::UPLOAD_FIELD, file, &file.name())
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let request = gloo_net::http::Request::post(&config.url(paths::UPLOAD)).body(form);
    required(send(config, request).await?)
}

/// `DELETE /api/files/{id}`
///
/// # Errors
///
/// See [`ApiError`].
pub async fn delete_file(config: &ClientConfig, id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::delete(&config.url(&paths::file(id))).build();
        send::<serde_json::Value>(config, request).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id);
        Err(ApiError::Unavailable)
    }
}

/// `GET /api/tasks`
///
/// # Errors
///
/// See [`ApiError`].
pub async fn fetch_tasks(config: &ClientConfig) -> Result<Vec<TodoTask>, ApiError> {
    Ok(get(config, paths::TASKS).await?.unwrap_or_default())
}

/// `GET /api/progress`
///
/// `None` when there is no current activity.
///
/// # Errors
///
/// See [`ApiError`].
pub async fn fetch_progress(config: &ClientConfig) -> Result<Option<ProgressRecord>, ApiError> {
    get(config, paths::PROGRESS).await
}
