//! Chat panel state: message list, send lifecycle, and typing indicator.
//!
//! DESIGN
//! ======
//! A send appends the user's message immediately and tags it provisional.
//! Success confirms it; failure keeps it and marks it undelivered. The
//! assistant reply can arrive both as the send response and over the update
//! channel, so every append is deduplicated by id.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::HashSet;

use model::{ChatMessage, ChatUpdate, Sender, Timestamp};

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Ids of optimistic user messages awaiting a send result.
    provisional: HashSet<String>,
    /// Ids of user messages whose send failed.
    undelivered: HashSet<String>,
    pub loading: bool,
    pub typing: bool,
}

impl ChatState {
    /// Merge fetched history with anything already received, oldest first.
    /// Equal timestamps keep their relative order.
    pub fn load_history(&mut self, history: Vec<ChatMessage>) {
        let mut merged = history;
        let known: HashSet<String> = merged.iter().map(|m| m.id.clone()).collect();
        merged.extend(self.messages.drain(..).filter(|m| !known.contains(&m.id)));
        merged.sort_by_key(|m| m.timestamp);
        let mut seen = HashSet::new();
        merged.retain(|m| seen.insert(m.id.clone()));
        self.messages = merged;
    }

    #[must_use]
    pub fn can_send(&self, input: &str) -> bool {
        !self.loading && !input.trim().is_empty()
    }

    /// Optimistically append the user's message. Returns the trimmed content
    /// to send, or `None` when the submit is a no-op.
    pub fn begin_send(&mut self, input: &str, id: String, now: Timestamp) -> Option<String> {
        if !self.can_send(input) {
            return None;
        }
        let content = input.trim().to_owned();
        self.provisional.insert(id.clone());
        self.messages.push(ChatMessage::text(id, content.clone(), Sender::User, now));
        self.loading = true;
        self.typing = true;
        Some(content)
    }

    /// Confirm the provisional message and append the assistant reply.
    pub fn complete_send(&mut self, provisional_id: &str, reply: ChatMessage) {
        self.provisional.remove(provisional_id);
        self.append(reply);
        self.loading = false;
        self.typing = false;
    }

    /// Keep the provisional message but mark it undelivered.
    pub fn fail_send(&mut self, provisional_id: &str) {
        if self.provisional.remove(provisional_id) {
            self.undelivered.insert(provisional_id.to_owned());
        }
        self.loading = false;
        self.typing = false;
    }

    pub fn apply_update(&mut self, update: ChatUpdate) {
        match update {
            ChatUpdate::Message { message } => {
                self.append(message);
            }
            ChatUpdate::Typing { is_typing } => self.typing = is_typing,
        }
    }

    /// Append unless a message with the same id exists. Returns whether it was added.
    pub fn append(&mut self, message: ChatMessage) -> bool {
        if self.messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    #[must_use]
    pub fn is_provisional(&self, id: &str) -> bool {
        self.provisional.contains(id)
    }

    #[must_use]
    pub fn is_undelivered(&self, id: &str) -> bool {
        self.undelivered.contains(id)
    }

    #[must_use]
    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_from_user()).count()
    }
}
