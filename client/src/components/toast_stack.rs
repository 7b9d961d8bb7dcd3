//! Non-modal notification stack.
//!
//! Toasts are pushed into the shared `ToastState`; each rendered item starts
//! its own auto-dismiss timer and can be closed by hand.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::toasts::{Toast, ToastState};

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For each=move || toasts.get().toasts key=|toast| toast.id let:toast>
                <ToastItem toast=toast/>
            </For>
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let id = toast.id;

    #[cfg(feature = "hydrate")]
    {
        let lifetime = crate::util::lifecycle::component_lifetime();
        let duration = config.toast_duration;
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(duration).await;
            if lifetime.is_alive() {
                toasts.update(|t| t.dismiss(id));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <div class=toast.variant.css_class() role="status">
            <div class="toast__body">
                <strong class="toast__title">{toast.title}</strong>
                <p class="toast__description">{toast.description}</p>
            </div>
            <button class="toast__close" title="Dismiss" on:click=move |_| toasts.update(|t| t.dismiss(id))>
                "×"
            </button>
        </div>
    }
}
