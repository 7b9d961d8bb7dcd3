use super::*;

fn file(id: &str, name: &str, mime: &str) -> UploadedFile {
    UploadedFile {
        id: id.into(),
        name: name.into(),
        mime_type: mime.into(),
        size: 10,
        uploaded_at: 1,
        url: format!("/api/files/{id}/content"),
        thumbnail_url: None,
    }
}

fn fixtures() -> FilesState {
    let mut state = FilesState::default();
    state.load(vec![file("1", "document.pdf", "application/pdf"), file("2", "image.jpg", "image/jpeg")]);
    state
}

#[test]
fn load_enforces_thumbnail_rule() {
    let mut state = FilesState::default();
    let mut pdf = file("1", "a.pdf", "application/pdf");
    pdf.thumbnail_url = Some("/thumb".into());
    state.load(vec![pdf, file("2", "b.png", "image/png")]);
    assert!(state.files[0].thumbnail_url.is_none());
    assert_eq!(state.files[1].thumbnail_url.as_deref(), Some("/api/files/2/content"));
}

#[test]
fn search_doc_over_empty_list_is_empty() {
    let mut state = FilesState::default();
    state.set_query("doc");
    assert!(state.filtered().is_empty());
    assert_eq!(state.empty_message(), EMPTY_NO_MATCHES);
}

#[test]
fn search_doc_matches_only_document() {
    let mut state = fixtures();
    state.set_query("DOC");
    let names: Vec<_> = state.filtered().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["document.pdf"]);
    assert_eq!(state.files.len(), 2);
}

#[test]
fn empty_message_without_query() {
    assert_eq!(FilesState::default().empty_message(), EMPTY_NO_FILES);
}

#[test]
fn upload_batch_is_exclusive() {
    let mut state = FilesState::default();
    assert!(state.begin_upload());
    assert!(!state.begin_upload());
    state.finish_upload();
    assert!(state.begin_upload());
}

#[test]
fn apply_upload_appends_or_replaces() {
    let mut state = fixtures();
    state.apply_upload(file("3", "notes.txt", "text/plain"));
    assert_eq!(state.files.len(), 3);
    state.apply_upload(file("3", "notes-v2.txt", "text/plain"));
    assert_eq!(state.files.len(), 3);
    assert_eq!(state.files[2].name, "notes-v2.txt");
}

#[test]
fn delete_requires_confirmation() {
    let mut state = fixtures();
    assert!(state.request_delete("1"));
    assert_eq!(state.files.len(), 2);
    let confirmed = state.confirm_delete().expect("pending file");
    assert_eq!(confirmed.id, "1");
    assert!(state.pending_delete.is_none());
}

#[test]
fn cancel_clears_pending_without_change() {
    let mut state = fixtures();
    state.request_delete("2");
    state.cancel_delete();
    assert!(state.confirm_delete().is_none());
    assert_eq!(state.files.len(), 2);
}

#[test]
fn request_delete_unknown_id_sets_nothing() {
    let mut state = fixtures();
    assert!(!state.request_delete("nope"));
    assert!(state.pending_delete.is_none());
}

#[test]
fn apply_delete_removes_exactly_one_and_preserves_order() {
    let mut state = fixtures();
    state.apply_upload(file("3", "c.txt", "text/plain"));
    let before = state.files.clone();
    assert!(state.apply_delete("2"));
    assert_eq!(state.files, vec![before[0].clone(), before[2].clone()]);
    assert!(!state.apply_delete("2"));
}

#[test]
fn delete_prompt_quotes_name() {
    assert_eq!(
        delete_prompt("image.jpg"),
        "Are you sure you want to delete \"image.jpg\"? This action cannot be undone."
    );
}

#[test]
fn failed_upload_does_not_stop_the_batch_or_append() {
    let mut state = fixtures();
    assert!(state.begin_upload());
    let mut attempted = Vec::new();
    let mut failures = Vec::new();

    futures::executor::block_on(upload_sequentially(
        vec!["a.png", "bad.pdf", "c.txt"],
        |name| (*name).to_owned(),
        |name: &'static str| {
            attempted.push(name);
            async move {
                if name == "bad.pdf" {
                    Err("server rejected")
                } else {
                    Ok(file(&format!("new-{name}"), name, "text/plain"))
                }
            }
        },
        |outcome| {
            match outcome {
                UploadOutcome::Uploaded(uploaded) => state.apply_upload(uploaded),
                UploadOutcome::Failed { name, error } => failures.push(format!("{name}: {error}")),
            }
            true
        },
    ));
    state.finish_upload();

    assert_eq!(attempted, vec!["a.png", "bad.pdf", "c.txt"]);
    assert_eq!(failures, vec!["bad.pdf: server rejected"]);
    let names: Vec<_> = state.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["document.pdf", "image.jpg", "a.png", "c.txt"]);
    assert!(!state.uploading);
}

#[test]
fn batch_stops_when_outcome_handler_declines() {
    let mut seen = 0;
    futures::executor::block_on(upload_sequentially(
        vec!["a", "b", "c"],
        |name| (*name).to_owned(),
        |name: &'static str| async move { Ok::<_, String>(file(name, name, "text/plain")) },
        |_| {
            seen += 1;
            false
        },
    ));
    assert_eq!(seen, 1);
}
