//! Demo data seeded into the store at startup.

use axum::body::Bytes;
use model::{ChatMessage, Priority, ProgressRecord, ProgressStatus, Sender, TaskStatus, Timestamp, TodoTask, UploadedFile, paths};

use crate::state::{Store, StoredFile};

const MINUTE_MS: Timestamp = 60_000;

const GREETING: &str = "Hello! I'm your multimodal AI assistant. I can help you analyze files, extract insights, and answer questions. How can I assist you today?";
const USER_REQUEST: &str = "Hi there! I've uploaded a document. Can you analyze it for me?";
const ANALYSIS: &str = "I've successfully analyzed your document. Here are the key insights I found:\n\n\
• Main topic: Market Analysis Report\n\
• Key findings: 23% growth in Q3\n\
• Recommendations: Expand into new markets\n\
• Risk factors: Supply chain concerns\n\n\
Would you like me to dive deeper into any specific section?";

/// Build the seeded store relative to `now`.
#[must_use]
pub fn seed(now: Timestamp) -> Store {
    Store {
        messages: messages(now),
        files: files(now),
        tasks: tasks(now),
        progress: Some(ProgressRecord::new("1", "Processing files...", 65, ProgressStatus::Running)),
    }
}

fn messages(now: Timestamp) -> Vec<ChatMessage> {
    vec![
        ChatMessage::text("1", GREETING, Sender::Llm, now - 10 * MINUTE_MS),
        ChatMessage::text("2", USER_REQUEST, Sender::User, now - 5 * MINUTE_MS),
        ChatMessage::text("3", ANALYSIS, Sender::Llm, now - 2 * MINUTE_MS),
    ]
}

fn files(now: Timestamp) -> Vec<StoredFile> {
    vec![
        fixture_file("1", "document.pdf", "application/pdf", b"%PDF-1.4\n", 1_024_000, now),
        fixture_file("2", "image.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0], 512_000, now),
    ]
}

/// Zero-padded placeholder content with a recognizable magic header.
fn fixture_file(id: &str, name: &str, mime: &str, header: &[u8], size: usize, uploaded_at: Timestamp) -> StoredFile {
    let mut bytes = vec![0u8; size.max(header.len())];
    bytes[..header.len()].copy_from_slice(header);
    let meta = UploadedFile {
        id: id.to_owned(),
        name: name.to_owned(),
        mime_type: mime.to_owned(),
        size: bytes.len() as u64,
        uploaded_at,
        url: paths::file_content(id),
        thumbnail_url: Some(paths::file_thumbnail(id)),
    }
    .normalized();
    StoredFile { meta, bytes: Bytes::from(bytes) }
}

fn tasks(now: Timestamp) -> Vec<TodoTask> {
    let mut read = TodoTask::new("1", "Read document.pdf", now - 5 * MINUTE_MS)
        .with_description("Extract key insights from uploaded document")
        .with_priority(Priority::High);
    read.status = TaskStatus::Completed;
    read.completed_at = Some(now - MINUTE_MS);

    let mut analyze = TodoTask::new("2", "Analyze image.jpg", now - 2 * MINUTE_MS)
        .with_description("Identify objects and extract text from image")
        .with_priority(Priority::Medium);
    analyze.status = TaskStatus::InProgress;

    let summary = TodoTask::new("3", "Generate summary report", now)
        .with_description("Create comprehensive analysis based on uploaded files")
        .with_priority(Priority::Low);

    vec![read, analyze, summary]
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
