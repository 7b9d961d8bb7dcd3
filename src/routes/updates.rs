//! Live update relay: broadcast channel to websocket.
//!
//! DESIGN
//! ======
//! Each connection owns one broadcast receiver and runs a `select!` loop:
//! - Broadcast events → serialize as JSON text → send to client
//! - Incoming client messages → ignored, except close
//!
//! A receiver that falls behind skips the missed events and keeps going;
//! clients reconcile with a fresh list fetch when they reconnect.

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

pub async fn forward<T>(mut socket: WebSocket, mut rx: broadcast::Receiver<T>, channel: &'static str)
where
    T: Serialize + Clone + Send + 'static,
{
    info!(channel, "updates: subscriber connected");
    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            event = rx.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(channel, error = %e, "updates: failed to encode event");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(channel, skipped, "updates: subscriber lagged; events dropped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    info!(channel, "updates: subscriber disconnected");
}
