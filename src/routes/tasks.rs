//! Task and progress routes.

use axum::extract::{State, WebSocketUpgrade};
use axum::response::{Json, Response};
use model::{ApiResponse, ProgressRecord, TodoTask};

use crate::routes::updates;
use crate::services::{progress, tasks};
use crate::state::AppState;

/// `GET /api/tasks`
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<TodoTask>>> {
    Json(ApiResponse::ok(tasks::list(&state).await))
}

/// `GET /api/tasks/updates`: websocket stream of changed tasks.
pub async fn updates(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let rx = state.task_updates.subscribe();
    ws.on_upgrade(move |socket| updates::forward(socket, rx, "tasks"))
}

/// `GET /api/progress`: current activity, or `null` data when idle.
pub async fn progress(State(state): State<AppState>) -> Json<ApiResponse<ProgressRecord>> {
    match progress::current(&state).await {
        Some(record) => Json(ApiResponse::ok(record)),
        None => Json(ApiResponse::ok_empty()),
    }
}
