use super::*;
use crate::config::ServerConfig;
use crate::services::chat::EchoResponder;
use crate::state::{Store, test_helpers};
use futures::StreamExt;
use model::{ApiResponse, ChatMessage, ChatUpdate, ProgressRecord, TodoTask, UploadedFile};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::time::{Duration, timeout};
use tokio_tungstenite::tungstenite::Message as WsMessage;

async fn serve(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, api_routes(state)).await.expect("serve");
    });
    format!("127.0.0.1:{}", addr.port())
}

fn file_part(name: &str, mime: &str, bytes: &[u8]) -> Form {
    let part = Part::bytes(bytes.to_vec()).file_name(name.to_owned()).mime_str(mime).expect("mime");
    Form::new().part(paths::UPLOAD_FIELD, part)
}

#[tokio::test]
async fn healthz_is_ok() {
    let host = serve(test_helpers::test_app_state()).await;
    let res = reqwest::get(format!("http://{host}/healthz")).await.expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn chat_history_and_send_round_trip() {
    let host = serve(test_helpers::test_app_state()).await;
    let client = reqwest::Client::new();

    let res: ApiResponse<Vec<ChatMessage>> = client
        .get(format!("http://{host}{}", paths::CHAT_HISTORY))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(res.into_data().expect("data"), vec![]);

    let res: ApiResponse<ChatMessage> = client
        .post(format!("http://{host}{}", paths::CHAT))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    let reply = res.into_data().expect("reply");
    assert!(reply.content.contains("\"hello\""));

    let res: ApiResponse<Vec<ChatMessage>> = client
        .get(format!("http://{host}{}", paths::CHAT_HISTORY))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(res.into_data().expect("data").len(), 2);
}

#[tokio::test]
async fn chat_send_rejects_bad_bodies_with_envelope() {
    let host = serve(test_helpers::test_app_state()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{host}{}", paths::CHAT))
        .json(&json!({ "message": "   " }))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["success"], false);

    let res = client
        .post(format!("http://{host}{}", paths::CHAT))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn file_upload_list_content_delete() {
    let host = serve(test_helpers::test_app_state()).await;
    let client = reqwest::Client::new();

    let res: ApiResponse<UploadedFile> = client
        .post(format!("http://{host}{}", paths::UPLOAD))
        .multipart(file_part("notes.txt", "text/plain", b"hello"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(res.message.as_deref(), Some("notes.txt uploaded successfully"));
    let file = res.into_data().expect("file");
    assert_eq!(file.size, 5);
    assert!(file.thumbnail_url.is_none());

    let listed: ApiResponse<Vec<UploadedFile>> = client
        .get(format!("http://{host}{}", paths::FILES))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(listed.into_data().expect("files"), vec![file.clone()]);

    let res = client.get(format!("http://{host}{}", file.url)).send().await.expect("request");
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert_eq!(res.bytes().await.expect("bytes").as_ref(), b"hello");

    let res = client
        .get(format!("http://{host}{}", paths::file_thumbnail(&file.id)))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client.delete(format!("http://{host}{}", paths::file(&file.id))).send().await.expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let res = client.delete(format!("http://{host}{}", paths::file(&file.id))).send().await.expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn image_upload_serves_thumbnail() {
    let host = serve(test_helpers::test_app_state()).await;
    let client = reqwest::Client::new();
    let res: ApiResponse<UploadedFile> = client
        .post(format!("http://{host}{}", paths::UPLOAD))
        .multipart(file_part("pic.png", "image/png", b"\x89PNG"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    let file = res.into_data().expect("file");
    let thumb = file.thumbnail_url.expect("thumbnail url");
    let res = client.get(format!("http://{host}{thumb}")).send().await.expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "image/png");
}

#[tokio::test]
async fn upload_over_limit_is_413() {
    let config = ServerConfig { max_upload_bytes: 8, seed_fixtures: false, ..ServerConfig::default() };
    let host = serve(AppState::new(config, Arc::new(EchoResponder))).await;
    let res = reqwest::Client::new()
        .post(format!("http://{host}{}", paths::UPLOAD))
        .multipart(file_part("big.bin", "application/octet-stream", &[0u8; 16]))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let host = serve(test_helpers::test_app_state()).await;
    let form = Form::new().text("other", "value");
    let res = reqwest::Client::new()
        .post(format!("http://{host}{}", paths::UPLOAD))
        .multipart(form)
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tasks_and_progress_are_listed() {
    let store = Store {
        tasks: vec![TodoTask::new("t1", "Index files", 1)],
        progress: Some(ProgressRecord::new("p1", "Processing files...", 65, model::ProgressStatus::Running)),
        ..Store::default()
    };
    let host = serve(test_helpers::test_app_state_with_store(store)).await;
    let client = reqwest::Client::new();

    let tasks: ApiResponse<Vec<TodoTask>> = client
        .get(format!("http://{host}{}", paths::TASKS))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(tasks.into_data().expect("tasks")[0].id, "t1");

    let progress: ApiResponse<ProgressRecord> = client
        .get(format!("http://{host}{}", paths::PROGRESS))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(progress.into_data().expect("progress").progress, 65);
}

#[tokio::test]
async fn progress_without_activity_is_null_data() {
    let host = serve(test_helpers::test_app_state()).await;
    let body: Value = reqwest::get(format!("http://{host}{}", paths::PROGRESS))
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn chat_updates_stream_typing_and_reply() {
    let state = test_helpers::test_app_state();
    let host = serve(state).await;
    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{host}{}", paths::CHAT_UPDATES))
        .await
        .expect("ws connect");

    let reply: ApiResponse<ChatMessage> = reqwest::Client::new()
        .post(format!("http://{host}{}", paths::CHAT))
        .json(&json!({ "message": "hi" }))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    let reply = reply.into_data().expect("reply");

    let mut events = Vec::new();
    while events.len() < 3 {
        let msg = timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("ws receive timed out")
            .expect("ws closed")
            .expect("ws error");
        if let WsMessage::Text(text) = msg {
            events.push(serde_json::from_str::<ChatUpdate>(text.as_str()).expect("chat update"));
        }
    }
    assert_eq!(
        events,
        vec![
            ChatUpdate::Typing { is_typing: true },
            ChatUpdate::Message { message: reply },
            ChatUpdate::Typing { is_typing: false },
        ]
    );
}

#[tokio::test]
async fn task_updates_stream_broadcast_tasks() {
    let state = test_helpers::test_app_state();
    let host = serve(state.clone()).await;
    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{host}{}", paths::TASK_UPDATES))
        .await
        .expect("ws connect");

    let task = TodoTask::new("t9", "Summarize", 5);
    state.task_updates.send(task.clone()).expect("subscriber attached");

    let msg = timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("ws receive timed out")
        .expect("ws closed")
        .expect("ws error");
    let WsMessage::Text(text) = msg else { panic!("expected text frame") };
    let got: TodoTask = serde_json::from_str(text.as_str()).expect("task json");
    assert_eq!(got, task);
}
