use super::*;
use crate::services::chat::EchoResponder;

#[test]
fn now_ms_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}

#[test]
fn store_default_is_empty() {
    let store = Store::default();
    assert!(store.messages.is_empty());
    assert!(store.files.is_empty());
    assert!(store.tasks.is_empty());
    assert!(store.progress.is_none());
}

#[tokio::test]
async fn new_seeds_fixtures_when_enabled() {
    let state = AppState::new(ServerConfig::default(), Arc::new(EchoResponder));
    let store = state.store.read().await;
    assert_eq!(store.messages.len(), 3);
    assert_eq!(store.files.len(), 2);
    assert_eq!(store.tasks.len(), 3);
    assert!(store.progress.is_some());
}

#[tokio::test]
async fn test_state_starts_empty() {
    let state = test_helpers::test_app_state();
    let store = state.store.read().await;
    assert!(store.messages.is_empty());
    assert!(store.tasks.is_empty());
}

#[tokio::test]
async fn update_channels_fan_out_to_every_subscriber() {
    let state = test_helpers::test_app_state();
    let mut a = state.chat_updates.subscribe();
    let mut b = state.chat_updates.subscribe();
    state
        .chat_updates
        .send(ChatUpdate::Typing { is_typing: true })
        .expect("receivers exist");
    assert_eq!(a.recv().await.expect("a"), ChatUpdate::Typing { is_typing: true });
    assert_eq!(b.recv().await.expect("b"), ChatUpdate::Typing { is_typing: true });
}
