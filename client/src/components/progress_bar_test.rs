use super::*;

#[test]
fn status_classes_follow_status() {
    assert_eq!(status_class(ProgressStatus::Running), "progress-bar--running");
    assert_eq!(status_class(ProgressStatus::Completed), "progress-bar--completed");
    assert_eq!(status_class(ProgressStatus::Error), "progress-bar--error");
}
