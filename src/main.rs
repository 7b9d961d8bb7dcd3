#![recursion_limit = "256"]

mod config;
mod fixtures;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env();
    let port = config.port;
    tracing::info!(?config, "configuration loaded");

    let state = state::AppState::new(config, Arc::new(services::chat::EchoResponder));

    // Background simulators feeding the live update channels.
    let _tasks = services::tasks::spawn_task_simulator(state.clone());
    let _progress = services::progress::spawn_progress_simulator(state.clone());

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos app unavailable; serving API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "si-mapper listening");
    axum::serve(listener, app).await.expect("server failed");
}
