use super::*;

const INTERVAL: Duration = Duration::from_secs(2);

fn state(status: ProgressStatus) -> ProgressState {
    ProgressState { record: Some(ProgressRecord::new("1", "Processing files...", 65, status)) }
}

#[test]
fn absent_and_idle_are_hidden() {
    assert!(!ProgressState::default().is_visible());
    assert!(!state(ProgressStatus::Idle).is_visible());
}

#[test]
fn running_completed_and_error_are_visible() {
    for status in [ProgressStatus::Running, ProgressStatus::Completed, ProgressStatus::Error] {
        assert!(state(status).is_visible());
    }
}

#[test]
fn polls_only_while_running() {
    let lifetime = Lifetime::new();
    assert_eq!(state(ProgressStatus::Running).next_poll_delay(&lifetime, INTERVAL), Some(INTERVAL));
    for status in [ProgressStatus::Idle, ProgressStatus::Completed, ProgressStatus::Error] {
        assert_eq!(state(status).next_poll_delay(&lifetime, INTERVAL), None);
    }
    assert_eq!(ProgressState::default().next_poll_delay(&lifetime, INTERVAL), None);
}

#[test]
fn nothing_scheduled_after_teardown() {
    let lifetime = Lifetime::new();
    lifetime.end();
    assert_eq!(state(ProgressStatus::Running).next_poll_delay(&lifetime, INTERVAL), None);
}

#[test]
fn polling_stops_when_status_leaves_running() {
    let lifetime = Lifetime::new();
    let mut progress = state(ProgressStatus::Running);
    assert!(progress.next_poll_delay(&lifetime, INTERVAL).is_some());
    progress.apply(Some(ProgressRecord::new("1", "Processing files...", 100, ProgressStatus::Completed)));
    assert!(progress.next_poll_delay(&lifetime, INTERVAL).is_none());
}

#[test]
fn failed_fetch_keeps_polling_a_running_record() {
    let lifetime = Lifetime::new();
    let progress = state(ProgressStatus::Running);
    assert_eq!(progress.next_poll_delay_after_error(&lifetime, INTERVAL), Some(INTERVAL));
    assert_eq!(progress.record.as_ref().map(|r| r.progress), Some(65));
}

#[test]
fn failed_fetch_without_a_running_record_stops() {
    let lifetime = Lifetime::new();
    assert_eq!(ProgressState::default().next_poll_delay_after_error(&lifetime, INTERVAL), None);
    assert_eq!(state(ProgressStatus::Completed).next_poll_delay_after_error(&lifetime, INTERVAL), None);
    lifetime.end();
    assert_eq!(state(ProgressStatus::Running).next_poll_delay_after_error(&lifetime, INTERVAL), None);
}
