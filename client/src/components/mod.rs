//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components bind the panel state containers from Leptos context to the
//! DOM and drive the network layer. Each panel owns its own fetches and
//! subscriptions, scoped to a `Lifetime` that ends on cleanup.

pub mod chat_panel;
pub mod confirm_dialog;
pub mod files_panel;
pub mod layout;
pub mod progress_bar;
pub mod tasks_panel;
pub mod toast_stack;
