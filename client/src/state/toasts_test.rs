use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut toasts = ToastState::default();
    let a = toasts.success("one");
    let b = toasts.error("two");
    assert!(b > a);
    assert_eq!(toasts.toasts[0].title, "Success");
    assert_eq!(toasts.toasts[1].variant, ToastVariant::Error);
}

#[test]
fn oldest_dropped_beyond_limit() {
    let mut toasts = ToastState::default();
    for i in 0..5 {
        toasts.success(format!("toast {i}"));
    }
    let descriptions: Vec<_> = toasts.toasts.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["toast 2", "toast 3", "toast 4"]);
}

#[test]
fn dismiss_removes_only_that_toast() {
    let mut toasts = ToastState::default();
    let a = toasts.success("a");
    let b = toasts.success("b");
    toasts.dismiss(a);
    assert_eq!(toasts.toasts.len(), 1);
    assert_eq!(toasts.toasts[0].id, b);
    toasts.dismiss(999);
    assert_eq!(toasts.toasts.len(), 1);
}

#[test]
fn limit_is_at_least_one() {
    let mut toasts = ToastState::with_limit(0);
    toasts.error("x");
    assert_eq!(toasts.toasts.len(), 1);
}
