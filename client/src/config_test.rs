use super::*;

#[test]
fn defaults_match_documented_values() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.request_timeout, Duration::from_secs(15));
    assert_eq!(cfg.progress_poll_interval, Duration::from_secs(2));
    assert_eq!(cfg.toast_duration, Duration::from_secs(4));
    assert_eq!(cfg.max_toasts, 3);
    assert_eq!(cfg.unknown_task_policy, UnknownTaskPolicy::Ignore);
}

#[test]
fn url_is_same_origin_by_default() {
    assert_eq!(ClientConfig::default().url("/api/tasks"), "/api/tasks");
}

#[test]
fn url_joins_base_without_double_slash() {
    let cfg = ClientConfig { api_base: "http://localhost:3000/".into(), ..ClientConfig::default() };
    assert_eq!(cfg.url("/api/files"), "http://localhost:3000/api/files");
}
