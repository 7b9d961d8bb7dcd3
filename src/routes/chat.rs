//! Chat routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{State, WebSocketUpgrade};
use axum::response::{Json, Response};
use model::{ApiResponse, ChatMessage, SendChatRequest};

use crate::routes::error::ApiError;
use crate::routes::updates;
use crate::services::chat;
use crate::state::AppState;

/// `GET /api/chat/history`: full history, oldest first.
pub async fn history(State(state): State<AppState>) -> Json<ApiResponse<Vec<ChatMessage>>> {
    Json(ApiResponse::ok(chat::history(&state).await))
}

/// `POST /api/chat`: send a message and wait for the assistant reply.
pub async fn send(
    State(state): State<AppState>,
    body: Result<Json<SendChatRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ChatMessage>>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let reply = chat::send_message(&state, &body.message, body.id.as_deref()).await?;
    Ok(Json(ApiResponse::ok(reply)))
}

/// `GET /api/chat/updates`: websocket stream of `ChatUpdate` events.
pub async fn updates(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let rx = state.chat_updates.subscribe();
    ws.on_upgrade(move |socket| updates::forward(socket, rx, "chat"))
}
