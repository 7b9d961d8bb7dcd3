//! Single-page layout: header, sidebar (files + tasks), chat, progress banner.
//!
//! SYSTEM CONTEXT
//! ==============
//! The layout owns the cross-cutting UI state (theme and sidebar
//! visibility). Panels are mounted side by side and never read each other's
//! state.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::components::files_panel::FilesPanel;
use crate::components::progress_bar::ProgressBar;
use crate::components::tasks_panel::TasksPanel;
use crate::components::toast_stack::ToastStack;
use crate::state::ui::UiState;
use crate::util::theme;

#[component]
pub fn MainLayout() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    // Browser-only initialization: stored theme and viewport width.
    Effect::new(move || {
        let initial = theme::read_preference();
        ui.update(|u| u.theme = initial);
        theme::apply(initial);
        sync_viewport(ui);
    });

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::resize, move |_| sync_viewport(ui));
        on_cleanup(move || handle.remove());
    }

    let on_toggle_theme = move |_| {
        if let Some(next) = ui.try_update(UiState::toggle_theme) {
            theme::persist(next);
        }
    };

    view! {
        <div class="layout" class:layout--sidebar-open=move || ui.get().sidebar_open>
            <header class="layout__header toolbar">
                <button
                    class="btn toolbar__sidebar-toggle"
                    title="Toggle sidebar"
                    aria-label="Toggle sidebar"
                    on:click=move |_| ui.update(UiState::toggle_sidebar)
                >
                    "☰"
                </button>
                <span class="toolbar__spacer"></span>
                <h1 class="toolbar__title">"SI-Mapper"</h1>
                <span class="toolbar__spacer"></span>
                <button class="btn toolbar__dark-toggle" title="Toggle dark mode" on:click=on_toggle_theme>
                    {move || if ui.get().theme.is_dark() { "☀" } else { "☾" }}
                </button>
            </header>

            <ProgressBar/>

            <div class="layout__body">
                <Show when=move || ui.get().show_overlay()>
                    <div class="layout__overlay" on:click=move |_| ui.update(UiState::close_overlay)></div>
                </Show>
                <aside class="layout__sidebar" class:layout__sidebar--hidden=move || !ui.get().sidebar_open>
                    <section class="layout__sidebar-top">
                        <FilesPanel/>
                    </section>
                    <section class="layout__sidebar-bottom">
                        <TasksPanel/>
                    </section>
                </aside>
                <main class="layout__main">
                    <ChatPanel/>
                </main>
            </div>

            <ToastStack/>
        </div>
    }
}

/// Re-evaluate the narrow-viewport query; only a change of mode resets the
/// sidebar.
fn sync_viewport(ui: RwSignal<UiState>) {
    #[cfg(feature = "hydrate")]
    {
        let is_mobile = web_sys::window()
            .and_then(|w| w.match_media(crate::state::ui::MOBILE_QUERY).ok().flatten())
            .is_some_and(|mq| mq.matches());
        if ui.with_untracked(|u| u.is_mobile) != is_mobile {
            ui.update(|u| u.set_mobile(is_mobile));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = ui;
}
