//! Uniform response envelope shared by every JSON endpoint.
//!
//! DESIGN
//! ======
//! Success and failure share one shape so clients can decode a body before
//! inspecting the HTTP status. `data` is optional on the wire: failures carry
//! `null`, and some successful operations (delete, empty progress) do too.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Serialize};

/// Error returned when unwrapping an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The server reported `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The server reported success but sent no payload where one was required.
    #[error("response carried no data")]
    MissingData,
}

/// `{ success, data, message?, error? }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None, error: None }
    }

    /// Successful response with a `null` payload.
    #[must_use]
    pub fn ok_empty() -> Self {
        Self { success: true, data: None, message: None, error: None }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, message: None, error: Some(error.into()) }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Unwrap the envelope, allowing an empty payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Rejected`] when `success` is false, using the
    /// `error` text, then `message`, then a generic fallback.
    pub fn into_result(self) -> Result<Option<T>, EnvelopeError> {
        if self.success {
            return Ok(self.data);
        }
        let reason = self
            .error
            .or(self.message)
            .unwrap_or_else(|| "request failed".to_owned());
        Err(EnvelopeError::Rejected(reason))
    }

    /// Unwrap the envelope, requiring a payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Rejected`] on failure and
    /// [`EnvelopeError::MissingData`] when the payload is `null`.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        self.into_result()?.ok_or(EnvelopeError::MissingData)
    }
}
