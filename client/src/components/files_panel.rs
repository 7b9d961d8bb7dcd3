//! Files panel: search, sequential multi-file upload, confirmed delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list is fetched once on mount. Uploads run one file at a time and
//! report each outcome separately; a failure does not stop the batch.
//! Deletes go through a confirmation dialog before the backend call.

#[cfg(test)]
#[path = "files_panel_test.rs"]
mod files_panel_test;

use leptos::prelude::*;
use model::UploadedFile;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::config::ClientConfig;
use crate::state::files::{FilesState, delete_prompt};
#[cfg(feature = "hydrate")]
use crate::state::files::{UploadOutcome, upload_sequentially};
use crate::state::toasts::ToastState;
use crate::util::format::{file_size, short_date};

pub const ACCEPTED_TYPES: &str = "image/*,.pdf,.doc,.docx,.txt";
pub const LOAD_FAILED: &str = "Failed to load files";
pub const DELETE_SUCCEEDED: &str = "File deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete file";

#[must_use]
pub fn upload_succeeded(name: &str) -> String {
    format!("{name} uploaded successfully")
}

#[must_use]
pub fn upload_failed(name: &str) -> String {
    format!("Upload of {name} failed. Please try again.")
}

#[component]
pub fn FilesPanel() -> impl IntoView {
    let files = expect_context::<RwSignal<FilesState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let picker_ref = NodeRef::<leptos::html::Input>::new();

    #[cfg(feature = "hydrate")]
    let lifetime = crate::util::lifecycle::component_lifetime();

    #[cfg(feature = "hydrate")]
    {
        let config = config.clone();
        let lifetime = lifetime.clone();
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_files(&config).await;
            if !lifetime.is_alive() {
                return;
            }
            match result {
                Ok(list) => files.update(|f| f.load(list)),
                Err(e) => {
                    leptos::logging::warn!("files: {e}");
                    toasts.update(|t| {
                        t.error(LOAD_FAILED);
                    });
                }
            }
        });
    }

    let upload_config = config.clone();
    #[cfg(feature = "hydrate")]
    let upload_lifetime = lifetime.clone();
    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(picker) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let selected: Vec<web_sys::File> = picker
                .files()
                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                .unwrap_or_default();
            if selected.is_empty() || !files.try_update(FilesState::begin_upload).unwrap_or(false) {
                picker.set_value("");
                return;
            }
            let config = upload_config.clone();
            let lifetime = upload_lifetime.clone();
            leptos::task::spawn_local(async move {
                let outcome_lifetime = lifetime.clone();
                upload_sequentially(
                    selected,
                    web_sys::File::name,
                    |file: web_sys::File| {
                        let config = config.clone();
                        async move { crate::net::api::upload_file(&config, &file).await }
                    },
                    |outcome| {
                        if !outcome_lifetime.is_alive() {
                            return false;
                        }
                        match outcome {
                            UploadOutcome::Uploaded(uploaded) => {
                                let message = upload_succeeded(&uploaded.name);
                                files.update(|f| f.apply_upload(uploaded));
                                toasts.update(|t| {
                                    t.success(message);
                                });
                            }
                            UploadOutcome::Failed { name, error } => {
                                leptos::logging::warn!("upload {name}: {error}");
                                toasts.update(|t| {
                                    t.error(upload_failed(&name));
                                });
                            }
                        }
                        true
                    },
                )
                .await;
                if !lifetime.is_alive() {
                    return;
                }
                files.update(FilesState::finish_upload);
                picker.set_value("");
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, &upload_config);
    };

    let on_confirm_delete = Callback::new(move |()| {
        let Some(target) = files.try_update(FilesState::confirm_delete).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let config = config.clone();
            let lifetime = lifetime.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::delete_file(&config, &target.id).await;
                if !lifetime.is_alive() {
                    return;
                }
                match result {
                    Ok(()) => {
                        files.update(|f| {
                            f.apply_delete(&target.id);
                        });
                        toasts.update(|t| {
                            t.success(DELETE_SUCCEEDED);
                        });
                    }
                    Err(e) => {
                        leptos::logging::warn!("delete {}: {e}", target.id);
                        toasts.update(|t| {
                            t.error(DELETE_FAILED);
                        });
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (target, &config, toasts);
    });
    let on_cancel_delete = Callback::new(move |()| files.update(FilesState::cancel_delete));
    let on_delete_request = Callback::new(move |id: String| {
        files.update(|f| {
            f.request_delete(&id);
        });
    });

    let open_picker = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(picker) = picker_ref.get_untracked() {
                picker.click();
            }
        }
    };

    view! {
        <div class="files-panel">
            <div class="files-panel__header">
                <h2 class="files-panel__title">"Files"</h2>
                <button
                    class="btn btn--primary files-panel__upload"
                    disabled=move || files.get().uploading
                    on:click=open_picker
                >
                    {move || if files.get().uploading { "Uploading..." } else { "Upload" }}
                </button>
                <input
                    class="files-panel__picker"
                    type="file"
                    multiple=true
                    accept=ACCEPTED_TYPES
                    hidden=true
                    node_ref=picker_ref
                    on:change=on_pick
                />
            </div>

            <input
                class="files-panel__search"
                type="search"
                placeholder="Search files..."
                prop:value=move || files.get().query
                on:input=move |ev| files.update(|f| f.set_query(event_target_value(&ev)))
            />

            <ul class="files-panel__list">
                {move || {
                    let state = files.get();
                    let visible = state.filtered();
                    if visible.is_empty() {
                        return view! { <li class="files-panel__empty">{state.empty_message()}</li> }.into_any();
                    }
                    visible
                        .into_iter()
                        .map(|file| view! { <FileRow file=file on_delete=on_delete_request/> })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </ul>

            <Show when=move || files.get().pending_delete.is_some()>
                <ConfirmDialog
                    title="Delete File"
                    message=files.get_untracked().pending_delete.map(|f| delete_prompt(&f.name)).unwrap_or_default()
                    confirm_label="Delete"
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            </Show>
        </div>
    }
}

#[component]
fn FileRow(file: UploadedFile, on_delete: Callback<String>) -> impl IntoView {
    let id = file.id.clone();
    let preview = match file.thumbnail_url.clone() {
        Some(src) => view! { <img class="files-panel__thumb" src=src alt=file.name.clone()/> }.into_any(),
        None => view! { <span class="files-panel__icon" aria-hidden="true">"📄"</span> }.into_any(),
    };

    view! {
        <li class="files-panel__item">
            {preview}
            <div class="files-panel__details">
                <a class="files-panel__name" href=file.url.clone() target="_blank" rel="noopener">
                    {file.name.clone()}
                </a>
                <span class="files-panel__meta">
                    {file_size(file.size)}
                    " · "
                    {short_date(file.uploaded_at)}
                </span>
            </div>
            <button
                class="btn btn--danger files-panel__delete"
                title="Delete file"
                on:click=move |_| on_delete.run(id.clone())
            >
                "Delete"
            </button>
        </li>
    }
}
