//! Networking modules for HTTP + websocket live updates.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles enveloped REST calls and `updates` manages websocket
//! subscriptions. Wire types come from the shared `model` crate.

pub mod api;
pub mod updates;
