//! # client
//!
//! Leptos + WASM frontend for SI-Mapper: a chat panel, an uploaded-files
//! browser, a task list, and a progress banner inside a responsive layout.
//!
//! `state` holds the plain-struct panel containers (tested without a
//! browser), `net` talks to the backend, and `components` binds both to the
//! DOM. All browser glue is gated behind the `hydrate` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
