//! Live update subscriptions over websocket.
//!
//! Each subscription owns one socket and a reconnect loop with exponential
//! backoff (1 s doubling to 10 s). Events are JSON text frames decoded into
//! the channel's event type and handed to a callback. The loop, and any
//! event delivery, stops once the subscription's `Lifetime` ends.
//!
//! Events broadcast while the socket is down are not replayed, so callers
//! get a [`LinkEvent::Reconnected`] after every reopen and re-fetch their
//! list from it.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "updates_test.rs"]
mod updates_test;

use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
use crate::config::ClientConfig;
#[cfg(feature = "hydrate")]
use crate::util::lifecycle::Lifetime;

pub const INITIAL_BACKOFF_MS: u32 = 1000;
pub const MAX_BACKOFF_MS: u32 = 10_000;

/// Connection changes a subscriber reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// The socket opened after an earlier attempt, successful or not.
    Reconnected,
    /// The first attempt failed before any connection was made.
    FirstAttemptFailed,
}

/// Tracks connection history to decide which [`LinkEvent`] to emit.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkTracker {
    connected_before: bool,
    failed_before: bool,
}

impl LinkTracker {
    /// The socket reached the open state.
    pub fn opened(&mut self) -> Option<LinkEvent> {
        let reconnected = self.connected_before || self.failed_before;
        self.connected_before = true;
        reconnected.then_some(LinkEvent::Reconnected)
    }

    /// An attempt failed before opening.
    pub fn failed(&mut self) -> Option<LinkEvent> {
        let first = !self.connected_before && !self.failed_before;
        self.failed_before = true;
        first.then_some(LinkEvent::FirstAttemptFailed)
    }
}

#[must_use]
pub fn next_backoff(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Websocket URL for `path`.
///
/// An absolute `api_base` has its scheme mapped to `ws`/`wss`; otherwise the
/// page's own protocol and host are used.
#[must_use]
pub fn ws_url(page_protocol: &str, page_host: &str, api_base: &str, path: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("https://") {
        return format!("wss://{rest}{path}");
    }
    if let Some(rest) = base.strip_prefix("http://") {
        return format!("ws://{rest}{path}");
    }
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    format!("{scheme}://{page_host}{base}{path}")
}

/// Decode one text frame.
///
/// # Errors
///
/// Returns the JSON error for malformed or unrecognized events.
pub fn parse_event<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text)
}

/// Subscribe to `path`, calling `on_event` for each decoded event until
/// `lifetime` ends. `on_link` receives connection changes.
#[cfg(feature = "hydrate")]
pub fn subscribe<T, F, L>(config: &ClientConfig, path: &'static str, lifetime: Lifetime, on_event: F, on_link: L)
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
    L: Fn(LinkEvent) + 'static,
{
    let location = web_sys::window().map(|w| w.location());
    let protocol = location.as_ref().and_then(|l| l.protocol().ok()).unwrap_or_default();
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let url = ws_url(&protocol, &host, &config.api_base, path);

    leptos::task::spawn_local(async move {
        let mut backoff_ms = INITIAL_BACKOFF_MS;
        let mut tracker = LinkTracker::default();
        while lifetime.is_alive() {
            let mut opened = false;
            let result = run_connection(&url, &lifetime, &on_event, || {
                opened = true;
                if let Some(event) = tracker.opened() {
                    on_link(event);
                }
            })
            .await;
            match result {
                Ok(()) => {
                    leptos::logging::log!("updates {path}: disconnected");
                    backoff_ms = INITIAL_BACKOFF_MS;
                }
                Err(e) => leptos::logging::warn!("updates {path}: {e}"),
            }
            if !lifetime.is_alive() {
                break;
            }
            if !opened {
                if let Some(event) = tracker.failed() {
                    on_link(event);
                }
            }
            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
            backoff_ms = next_backoff(backoff_ms);
        }
    });
}

#[cfg(feature = "hydrate")]
const OPEN_POLL_MS: u64 = 50;

#[cfg(feature = "hydrate")]
async fn run_connection<T, F, O>(url: &str, lifetime: &Lifetime, on_event: &F, on_open: O) -> Result<(), String>
where
    T: DeserializeOwned,
    F: Fn(T),
    O: FnOnce(),
{
    use futures::StreamExt;
    use gloo_net::websocket::futures::WebSocket;
    use gloo_net::websocket::{Message, State};

    let mut ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    loop {
        match ws.state() {
            State::Open => break,
            State::Connecting if lifetime.is_alive() => {
                gloo_timers::future::sleep(std::time::Duration::from_millis(OPEN_POLL_MS)).await;
            }
            State::Connecting => return Ok(()),
            State::Closing | State::Closed => return Err("connection refused".to_owned()),
        }
    }
    on_open();

    while let Some(msg) = ws.next().await {
        if !lifetime.is_alive() {
            break;
        }
        match msg {
            Ok(Message::Text(text)) => match parse_event::<T>(&text) {
                Ok(event) => on_event(event),
                Err(e) => leptos::logging::warn!("updates: dropped malformed event: {e}"),
            },
            Ok(Message::Bytes(_)) => {}
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(())
}
