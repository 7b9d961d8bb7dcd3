use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use futures_util::StreamExt;
use model::{
    ApiResponse, ChatMessage, ChatUpdate, EnvelopeError, ProgressRecord, SendChatRequest, Sender,
    TodoTask, UploadedFile, paths,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("server rejected request: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("could not read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("refusing to delete {0} without --yes")]
    ConfirmationRequired(String),
    #[error("{failed} of {total} uploads failed")]
    UploadsFailed { failed: usize, total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "si-mapper-cli", about = "SI-Mapper API and live update CLI")]
struct Cli {
    #[arg(long, env = "SI_MAPPER_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, default_value_t = 15, help = "Request timeout in seconds")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check server health.
    Ping,
    /// Print the chat history, oldest first.
    History,
    /// Send a chat message and print the assistant reply.
    Send {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List uploaded files.
    Files {
        #[arg(long)]
        search: Option<String>,
    },
    /// Upload files one at a time; failures are reported and skipped.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete an uploaded file.
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// List tasks.
    Tasks,
    /// Show the current progress record.
    Progress,
    /// Stream live update events until the server closes the socket.
    Watch { channel: Channel },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Chat,
    Tasks,
}

impl Channel {
    fn path(self) -> &'static str {
        match self {
            Self::Chat => paths::CHAT_UPDATES,
            Self::Tasks => paths::TASK_UPDATES,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))?;

    match cli.command {
        Command::Ping => run_ping(&api).await,
        Command::History => run_history(&api).await,
        Command::Send { text } => run_send(&api, &text.join(" ")).await,
        Command::Files { search } => run_files(&api, search.as_deref()).await,
        Command::Upload { paths } => run_upload(&api, &paths).await,
        Command::Delete { id, yes } => run_delete(&api, &id, yes).await,
        Command::Tasks => run_tasks(&api).await,
        Command::Progress => run_progress(&api).await,
        Command::Watch { channel } => run_watch(&cli.base_url, channel).await,
    }
}

// =============================================================================
// HTTP
// =============================================================================

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str, timeout: Duration) -> Result<Self, CliError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, CliError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_envelope(response).await
    }
}

async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<Option<T>, CliError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    decode_envelope(status, &body)
}

/// Decode an envelope body, falling back to the HTTP status when the body is
/// not an envelope.
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, CliError> {
    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => Ok(envelope.into_result()?),
        Err(_) if !(200..300).contains(&status) => Err(CliError::Status(status)),
        Err(e) => Err(CliError::InvalidJson(e)),
    }
}

fn required<T>(data: Option<T>) -> Result<T, CliError> {
    data.ok_or(CliError::Envelope(EnvelopeError::MissingData))
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(api: &ApiClient) -> Result<(), CliError> {
    let response = api.http.get(api.url("/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_history(api: &ApiClient) -> Result<(), CliError> {
    let mut history: Vec<ChatMessage> = api.get(paths::CHAT_HISTORY).await?.unwrap_or_default();
    history.sort_by_key(|m| m.timestamp);
    for message in &history {
        println!("{}", format_message(message));
    }
    Ok(())
}

async fn run_send(api: &ApiClient, text: &str) -> Result<(), CliError> {
    let body = SendChatRequest { message: text.to_owned(), id: None };
    let response = api.http.post(api.url(paths::CHAT)).json(&body).send().await?;
    let reply: ChatMessage = required(read_envelope(response).await?)?;
    println!("{}", format_message(&reply));
    Ok(())
}

async fn run_files(api: &ApiClient, search: Option<&str>) -> Result<(), CliError> {
    let files: Vec<UploadedFile> = api.get(paths::FILES).await?.unwrap_or_default();
    let visible = filter_files(&files, search.unwrap_or_default());
    if visible.is_empty() {
        let empty = if search.is_some_and(|q| !q.trim().is_empty()) {
            "No files match your search"
        } else {
            "No files uploaded yet"
        };
        println!("{empty}");
    }
    for file in visible {
        println!("{}", format_file(file));
    }
    Ok(())
}

async fn run_upload(api: &ApiClient, files: &[PathBuf]) -> Result<(), CliError> {
    let outcomes = upload_batch(files, |path| async move { upload_one(api, path).await }).await;
    let mut failed = 0_usize;
    for (path, outcome) in files.iter().zip(&outcomes) {
        match outcome {
            Ok(file) => println!("{} uploaded successfully ({})", file.name, file.id),
            Err(error) => {
                failed = failed.saturating_add(1);
                tracing::warn!(path = %path.display(), %error, "upload failed");
                eprintln!("{}: {error}", path.display());
            }
        }
    }
    if failed > 0 {
        return Err(CliError::UploadsFailed { failed, total: files.len() });
    }
    Ok(())
}

/// Upload every path in order; one failure does not stop the rest.
async fn upload_batch<'a, F, Fut>(paths: &'a [PathBuf], mut upload: F) -> Vec<Result<UploadedFile, CliError>>
where
    F: FnMut(&'a Path) -> Fut,
    Fut: Future<Output = Result<UploadedFile, CliError>>,
{
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        outcomes.push(upload(path.as_path()).await);
    }
    outcomes
}

async fn upload_one(api: &ApiClient, path: &Path) -> Result<UploadedFile, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    let part = Part::bytes(bytes).file_name(name).mime_str(mime_for(path).as_ref())?;
    let form = Form::new().part(paths::UPLOAD_FIELD, part);
    let response = api.http.post(api.url(paths::UPLOAD)).multipart(form).send().await?;
    required(read_envelope(response).await?)
}

async fn run_delete(api: &ApiClient, id: &str, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired(id.to_owned()));
    }
    let response = api.http.delete(api.url(&paths::file(id))).send().await?;
    read_envelope::<serde_json::Value>(response).await?;
    println!("deleted {id}");
    Ok(())
}

async fn run_tasks(api: &ApiClient) -> Result<(), CliError> {
    let tasks: Vec<TodoTask> = api.get(paths::TASKS).await?.unwrap_or_default();
    if tasks.is_empty() {
        println!("No tasks yet");
    }
    for task in &tasks {
        println!("{}", format_task(task));
    }
    Ok(())
}

async fn run_progress(api: &ApiClient) -> Result<(), CliError> {
    let record: Option<ProgressRecord> = api.get(paths::PROGRESS).await?;
    println!("{}", format_progress(record.as_ref()));
    Ok(())
}

async fn run_watch(base_url: &str, channel: Channel) -> Result<(), CliError> {
    let url = ws_url(base_url, channel.path())?;
    tracing::info!(%url, "connecting");
    let (mut stream, _) = connect_async(url)
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;

    while let Some(message) = stream.next().await {
        match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
            Message::Text(text) => match render_event(channel, &text) {
                Ok(line) => println!("{line}"),
                Err(error) => tracing::warn!(%error, "dropped malformed event"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
    tracing::info!("socket closed");
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn ws_url(base_url: &str, path: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}{path}"));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}{path}"));
    }
    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

fn render_event(channel: Channel, text: &str) -> Result<String, serde_json::Error> {
    match channel {
        Channel::Chat => Ok(match serde_json::from_str::<ChatUpdate>(text)? {
            ChatUpdate::Message { message } => format_message(&message),
            ChatUpdate::Typing { is_typing: true } => "(assistant is typing)".to_owned(),
            ChatUpdate::Typing { is_typing: false } => "(assistant stopped typing)".to_owned(),
        }),
        Channel::Tasks => Ok(format_task(&serde_json::from_str::<TodoTask>(text)?)),
    }
}

fn filter_files<'a>(files: &'a [UploadedFile], query: &str) -> Vec<&'a UploadedFile> {
    files.iter().filter(|f| f.name_matches(query)).collect()
}

fn format_message(message: &ChatMessage) -> String {
    let who = match message.sender {
        Sender::User => "user",
        Sender::Llm => "llm",
    };
    format!("[{who}] {}", message.content)
}

fn format_file(file: &UploadedFile) -> String {
    format!("{}\t{}\t{}\t{} bytes", file.id, file.name, file.mime_type, file.size)
}

fn format_task(task: &TodoTask) -> String {
    format!("[{}] {} ({})", task.status.as_str(), task.title, task.id)
}

fn format_progress(record: Option<&ProgressRecord>) -> String {
    let Some(record) = record else {
        return "no current activity".to_owned();
    };
    format!("{} {}% ({})", record.title, record.progress, record.status.as_str())
}

/// MIME type for an upload, guessed from the extension.
fn mime_for(path: &Path) -> mime_guess::Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}
