//! Component lifetime tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Panels spawn local async work (initial fetch, subscriptions, poll loops,
//! toast timers). Each task holds a `Lifetime`; when the owning component is
//! cleaned up the token ends, and the task checks it before touching state.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Lifetime {
    alive: Arc<AtomicBool>,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifetime {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn end(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

/// A lifetime that ends when the current reactive owner is cleaned up.
pub fn component_lifetime() -> Lifetime {
    let lifetime = Lifetime::new();
    let handle = lifetime.clone();
    leptos::prelude::on_cleanup(move || handle.end());
    lifetime
}
