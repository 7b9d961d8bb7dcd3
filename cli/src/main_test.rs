use super::*;
use clap::CommandFactory;
use model::{ProgressStatus, TaskStatus};

fn file(id: &str, name: &str) -> UploadedFile {
    UploadedFile {
        id: id.to_owned(),
        name: name.to_owned(),
        mime_type: "application/pdf".to_owned(),
        size: 10,
        uploaded_at: 0,
        url: paths::file_content(id),
        thumbnail_url: None,
    }
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn delete_flag_parses() {
    let cli = Cli::try_parse_from(["si-mapper-cli", "delete", "42", "--yes"]).expect("parse");
    assert!(matches!(cli.command, Command::Delete { ref id, yes: true } if id == "42"));
}

#[test]
fn send_joins_words() {
    let cli = Cli::try_parse_from(["si-mapper-cli", "send", "hello", "there"]).expect("parse");
    let Command::Send { text } = cli.command else {
        panic!("expected send");
    };
    assert_eq!(text.join(" "), "hello there");
}

#[test]
fn watch_accepts_known_channels_only() {
    assert!(Cli::try_parse_from(["si-mapper-cli", "watch", "tasks"]).is_ok());
    assert!(Cli::try_parse_from(["si-mapper-cli", "watch", "presence"]).is_err());
}

#[tokio::test]
async fn delete_without_confirmation_is_refused() {
    let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("client");
    let result = run_delete(&api, "1", false).await;
    assert!(matches!(result, Err(CliError::ConfirmationRequired(id)) if id == "1"));
}

#[test]
fn ws_url_maps_scheme() {
    assert_eq!(ws_url("http://localhost:3000/", "/api/chat/updates").expect("url"), "ws://localhost:3000/api/chat/updates");
    assert_eq!(ws_url("https://example.test", "/api/tasks/updates").expect("url"), "wss://example.test/api/tasks/updates");
    assert!(matches!(ws_url("ftp://x", "/y"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn envelope_rejection_surfaces_error_text() {
    let result = decode_envelope::<()>(404, r#"{"success":false,"data":null,"error":"file not found: 9"}"#);
    assert!(matches!(result, Err(CliError::Envelope(EnvelopeError::Rejected(msg))) if msg == "file not found: 9"));
}

#[test]
fn non_envelope_error_uses_status() {
    assert!(matches!(decode_envelope::<()>(502, "Bad Gateway"), Err(CliError::Status(502))));
}

#[test]
fn search_is_case_insensitive() {
    let files = vec![file("1", "document.pdf"), file("2", "image.jpg")];
    let hits = filter_files(&files, "DOC");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
    assert_eq!(filter_files(&files, "").len(), 2);
}

#[test]
fn render_chat_events() {
    let line = render_event(
        Channel::Chat,
        r#"{"type":"message","message":{"id":"1","content":"hi","sender":"llm","timestamp":1}}"#,
    )
    .expect("event");
    assert_eq!(line, "[llm] hi");
    assert_eq!(render_event(Channel::Chat, r#"{"type":"typing","isTyping":true}"#).expect("event"), "(assistant is typing)");
    assert!(render_event(Channel::Chat, "{}").is_err());
}

#[test]
fn render_task_event() {
    let line = render_event(Channel::Tasks, r#"{"id":"3","title":"Extract text","status":"in_progress","createdAt":1}"#)
        .expect("event");
    assert_eq!(line, "[in_progress] Extract text (3)");
}

#[test]
fn progress_line() {
    let record = ProgressRecord::new("p", "Processing files...", 65, ProgressStatus::Running);
    assert_eq!(format_progress(Some(&record)), "Processing files... 65% (running)");
    assert_eq!(format_progress(None), "no current activity");
}

#[test]
fn task_line_uses_wire_status() {
    let mut task = TodoTask::new("7", "Index", 0);
    task.status = TaskStatus::Failed;
    assert_eq!(format_task(&task), "[failed] Index (7)");
}

#[test]
fn mime_by_extension() {
    assert_eq!(mime_for(Path::new("a/photo.JPG")).essence_str(), "image/jpeg");
    assert_eq!(mime_for(Path::new("notes.txt")).essence_str(), "text/plain");
    assert_eq!(mime_for(Path::new("scan.tiff")).essence_str(), "image/tiff");
    assert_eq!(mime_for(Path::new("archive")).essence_str(), "application/octet-stream");
}

#[tokio::test]
async fn upload_batch_continues_past_a_failure() {
    let paths: Vec<PathBuf> = ["a.png", "missing.pdf", "c.txt"].iter().map(PathBuf::from).collect();
    let mut attempted = Vec::new();
    let outcomes = upload_batch(&paths, |path| {
        attempted.push(path.display().to_string());
        let name = path.display().to_string();
        async move {
            if name == "missing.pdf" {
                Err(CliError::Io { path: name, source: std::io::Error::from(std::io::ErrorKind::NotFound) })
            } else {
                Ok(file(&name, &name))
            }
        }
    })
    .await;

    assert_eq!(attempted, vec!["a.png", "missing.pdf", "c.txt"]);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert!(matches!(outcomes[1], Err(CliError::Io { .. })));
    assert_eq!(outcomes[2].as_ref().map(|f| f.name.as_str()).ok(), Some("c.txt"));
}
