use super::*;

#[test]
fn new_lifetime_is_alive() {
    assert!(Lifetime::new().is_alive());
}

#[test]
fn end_is_visible_through_clones() {
    let lifetime = Lifetime::new();
    let task_copy = lifetime.clone();
    lifetime.end();
    assert!(!task_copy.is_alive());
}

#[test]
fn end_is_idempotent() {
    let lifetime = Lifetime::default();
    lifetime.end();
    lifetime.end();
    assert!(!lifetime.is_alive());
}
