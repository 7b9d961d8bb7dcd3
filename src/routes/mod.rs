//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON + websocket API and stitches it together with
//! Leptos SSR rendering under a single Axum router. Compiled client assets
//! are served from `/pkg`.

pub mod chat;
pub mod error;
pub mod files;
pub mod tasks;
pub mod updates;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use model::paths;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON and websocket API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    // Multipart framing overhead on top of the file itself.
    let upload_limit = state.config.max_upload_bytes.saturating_add(64 * 1024);

    Router::new()
        .route(paths::CHAT_HISTORY, get(chat::history))
        .route(paths::CHAT, post(chat::send))
        .route(paths::CHAT_UPDATES, get(chat::updates))
        .route(paths::FILES, get(files::list))
        .route(paths::UPLOAD, post(files::upload).layer(DefaultBodyLimit::max(upload_limit)))
        .route("/api/files/{id}", delete(files::delete))
        .route("/api/files/{id}/content", get(files::content))
        .route("/api/files/{id}/thumbnail", get(files::thumbnail))
        .route(paths::TASKS, get(tasks::list))
        .route(paths::TASK_UPDATES, get(tasks::updates))
        .route(paths::PROGRESS, get(tasks::progress))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API routes + Leptos SSR for the app shell + `/pkg` static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
