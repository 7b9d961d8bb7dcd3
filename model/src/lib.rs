//! Shared wire model for the SI-Mapper backend and its clients.
//!
//! This crate owns the JSON representation used by the server, the Leptos
//! client, and the CLI: chat messages, uploaded files, tasks, progress
//! records, the uniform response envelope, live update events, and the
//! endpoint paths. Field names follow the camelCase wire shape; timestamps
//! are milliseconds since the Unix epoch.

pub mod chat;
pub mod envelope;
pub mod files;
pub mod paths;
pub mod progress;
pub mod tasks;

pub use chat::{ChatMessage, ChatUpdate, MessageKind, SendChatRequest, Sender};
pub use envelope::{ApiResponse, EnvelopeError};
pub use files::{UploadedFile, is_image_type};
pub use progress::{ProgressRecord, ProgressStatus, clamp_progress};
pub use tasks::{Priority, TaskStatus, TodoTask, TransitionError};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;
