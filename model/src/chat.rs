//! Chat messages and the chat live-update event union.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the application.
    User,
    /// The assistant.
    Llm,
}

/// Presentation hint for a chat message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    File,
    System,
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Opaque identifier, unique within a session.
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: Timestamp,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
}

impl ChatMessage {
    /// Build a plain-text message.
    #[must_use]
    pub fn text(id: impl Into<String>, content: impl Into<String>, sender: Sender, timestamp: Timestamp) -> Self {
        Self { id: id.into(), content: content.into(), sender, timestamp, kind: Some(MessageKind::Text) }
    }

    #[must_use]
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Event delivered on the chat updates channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatUpdate {
    /// A complete new message to append.
    Message { message: ChatMessage },
    /// Assistant typing indicator toggle.
    Typing {
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendChatRequest {
    pub message: String,
    /// Id the sender already shows the message under. The backend stores
    /// the message with it so a later history fetch lines up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
