//! Domain services used by the HTTP and websocket routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the store mutations and broadcasts so route handlers
//! stay focused on envelope translation.

pub mod chat;
pub mod files;
pub mod progress;
pub mod tasks;
