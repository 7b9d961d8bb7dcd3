//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::MainLayout;
use crate::config::ClientConfig;
use crate::state::{
    chat::ChatState, files::FilesState, progress::ProgressState, tasks::TasksState, toasts::ToastState, ui::UiState,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the client configuration and one state container per panel,
/// then mounts the single-page layout.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::default();
    let toasts = RwSignal::new(ToastState::with_limit(config.max_toasts));

    provide_context(config);
    provide_context(toasts);
    provide_context(RwSignal::new(UiState::default()));
    provide_context(RwSignal::new(ChatState::default()));
    provide_context(RwSignal::new(FilesState::default()));
    provide_context(RwSignal::new(TasksState::default()));
    provide_context(RwSignal::new(ProgressState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/si-mapper.css"/>
        <Title text="SI-Mapper"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=MainLayout/>
            </Routes>
        </Router>
    }
}
