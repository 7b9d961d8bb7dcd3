//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from panel and
//! component logic to improve reuse and testability.

pub mod clock;
pub mod format;
pub mod lifecycle;
pub mod markdown;
pub mod scroll;
pub mod theme;
