//! Panel state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each container is a plain struct held in an `RwSignal` and provided via
//! context. Containers never reach into each other; components bind them to
//! the network layer and the DOM.

pub mod chat;
pub mod files;
pub mod progress;
pub mod tasks;
pub mod toasts;
pub mod ui;
