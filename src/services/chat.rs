//! Chat service: history, send, and the assistant reply flow.
//!
//! DESIGN
//! ======
//! A send stores the user's message, announces typing on the chat update
//! channel, waits out the configured reply delay, asks the responder for a
//! reply, then stores and broadcasts that reply. The user's own message is
//! never broadcast; the sender already shows it optimistically.
//!
//! ERROR HANDLING
//! ==============
//! Whatever the responder does, typing is switched off before returning so
//! no subscriber is left with a stuck indicator.

use model::{ChatMessage, ChatUpdate, Sender};
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::{AppState, now_ms};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("assistant failed: {0}")]
    Responder(String),
}

/// Produces the assistant reply for a user message. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AssistantResponder: Send + Sync {
    /// Reply to `prompt` given the conversation so far (including `prompt`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Responder`] if no reply can be produced.
    async fn reply(&self, prompt: &str, history: &[ChatMessage]) -> Result<String, ChatError>;
}

/// Canned responder that acknowledges the user's message.
pub struct EchoResponder;

#[async_trait::async_trait]
impl AssistantResponder for EchoResponder {
    async fn reply(&self, prompt: &str, _history: &[ChatMessage]) -> Result<String, ChatError> {
        Ok(echo_reply(prompt))
    }
}

#[must_use]
pub fn echo_reply(prompt: &str) -> String {
    format!(
        "I understand you said: \"{prompt}\". I'm processing your request and will provide a detailed response. \
         This might involve analyzing any uploaded files or performing the tasks you've mentioned. \
         Please give me a moment to complete this analysis."
    )
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Full history, oldest first. Equal timestamps keep insertion order.
pub async fn history(state: &AppState) -> Vec<ChatMessage> {
    let mut messages = state.store.read().await.messages.clone();
    messages.sort_by_key(|m| m.timestamp);
    messages
}

/// Store `content` as a user message and return the assistant reply.
///
/// `client_id` is reused for the stored user message when it is non-empty
/// and not already taken; otherwise a fresh id is minted.
///
/// # Errors
///
/// Returns [`ChatError::EmptyMessage`] for blank input, or the responder's
/// error if it fails.
pub async fn send_message(state: &AppState, content: &str, client_id: Option<&str>) -> Result<ChatMessage, ChatError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let history = {
        let mut store = state.store.write().await;
        let id = match client_id.map(str::trim) {
            Some(id) if !id.is_empty() && !store.messages.iter().any(|m| m.id == id) => id.to_owned(),
            _ => Uuid::new_v4().to_string(),
        };
        store.messages.push(ChatMessage::text(id, content, Sender::User, now_ms()));
        store.messages.clone()
    };
    info!(chars = content.len(), "chat: user message stored");

    set_typing(state, true);
    if !state.config.reply_delay.is_zero() {
        tokio::time::sleep(state.config.reply_delay).await;
    }

    let reply = state.responder.reply(content, &history).await;
    let result = match reply {
        Ok(text) => {
            let message = ChatMessage::text(Uuid::new_v4().to_string(), text, Sender::Llm, now_ms());
            state.store.write().await.messages.push(message.clone());
            let _ = state.chat_updates.send(ChatUpdate::Message { message: message.clone() });
            Ok(message)
        }
        Err(e) => {
            warn!(error = %e, "chat: responder failed");
            Err(e)
        }
    };
    set_typing(state, false);
    result
}

fn set_typing(state: &AppState, is_typing: bool) {
    // No subscribers is not an error.
    let _ = state.chat_updates.send(ChatUpdate::Typing { is_typing });
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
