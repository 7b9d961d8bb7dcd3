//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the in-memory store behind one `RwLock`, the broadcast senders
//! that feed the chat and task update channels, and the assistant responder
//! used by chat sends. Every websocket subscriber owns its own broadcast
//! receiver, so a slow client never blocks a writer.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use model::{ChatMessage, ChatUpdate, ProgressRecord, Timestamp, TodoTask, UploadedFile};
use tokio::sync::{RwLock, broadcast};

use crate::config::ServerConfig;
use crate::fixtures;
use crate::services::chat::AssistantResponder;

/// Capacity of each live update channel before slow receivers start lagging.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

// =============================================================================
// STORE
// =============================================================================

/// File metadata plus the raw bytes served from the content endpoints.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub meta: UploadedFile,
    pub bytes: Bytes,
}

/// All backend data. Chat and tasks are append/update-only; files can be
/// deleted.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub messages: Vec<ChatMessage>,
    pub files: Vec<StoredFile>,
    pub tasks: Vec<TodoTask>,
    pub progress: Option<ProgressRecord>,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<RwLock<Store>>,
    pub chat_updates: broadcast::Sender<ChatUpdate>,
    pub task_updates: broadcast::Sender<TodoTask>,
    pub responder: Arc<dyn AssistantResponder>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, responder: Arc<dyn AssistantResponder>) -> Self {
        let store = if config.seed_fixtures { fixtures::seed(now_ms()) } else { Store::default() };
        Self::with_store(config, responder, store)
    }

    #[must_use]
    pub fn with_store(config: ServerConfig, responder: Arc<dyn AssistantResponder>, store: Store) -> Self {
        let (chat_updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let (task_updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            chat_updates,
            task_updates,
            responder,
        }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
