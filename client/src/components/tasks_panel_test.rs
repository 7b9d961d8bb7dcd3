use super::*;

#[test]
fn every_status_has_a_distinct_icon() {
    let icons = [
        status_icon(TaskStatus::Pending),
        status_icon(TaskStatus::InProgress),
        status_icon(TaskStatus::Completed),
        status_icon(TaskStatus::Failed),
    ];
    let unique: std::collections::HashSet<_> = icons.iter().collect();
    assert_eq!(unique.len(), icons.len());
}

#[test]
fn priority_accent_classes() {
    assert_eq!(priority_class(Some(Priority::High)), "tasks-panel__task--high");
    assert_eq!(priority_class(Some(Priority::Low)), "tasks-panel__task--low");
    assert_eq!(priority_class(None), "");
}
