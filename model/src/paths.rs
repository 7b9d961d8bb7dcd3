//! Endpoint paths shared by the server router and its clients.

pub const CHAT_HISTORY: &str = "/api/chat/history";
pub const CHAT: &str = "/api/chat";
pub const CHAT_UPDATES: &str = "/api/chat/updates";
pub const FILES: &str = "/api/files";
pub const UPLOAD: &str = "/api/upload";
pub const TASKS: &str = "/api/tasks";
pub const TASK_UPDATES: &str = "/api/tasks/updates";
pub const PROGRESS: &str = "/api/progress";

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[must_use]
pub fn file(id: &str) -> String {
    format!("{FILES}/{id}")
}

#[must_use]
pub fn file_content(id: &str) -> String {
    format!("{FILES}/{id}/content")
}

#[must_use]
pub fn file_thumbnail(id: &str) -> String {
    format!("{FILES}/{id}/thumbnail")
}
