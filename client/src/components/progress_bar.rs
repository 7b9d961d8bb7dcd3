//! Progress banner with a status-colored bar.
//!
//! Fetches `/api/progress` on mount and keeps re-fetching on the configured
//! interval while the record is running. Absent or idle records render
//! nothing.

#[cfg(test)]
#[path = "progress_bar_test.rs"]
mod progress_bar_test;

use leptos::prelude::*;
use model::ProgressStatus;

use crate::config::ClientConfig;
use crate::state::progress::ProgressState;

#[must_use]
pub fn status_class(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Idle => "progress-bar--idle",
        ProgressStatus::Running => "progress-bar--running",
        ProgressStatus::Completed => "progress-bar--completed",
        ProgressStatus::Error => "progress-bar--error",
    }
}

#[component]
pub fn ProgressBar() -> impl IntoView {
    let progress = expect_context::<RwSignal<ProgressState>>();
    let config = expect_context::<ClientConfig>();

    #[cfg(feature = "hydrate")]
    {
        let lifetime = crate::util::lifecycle::component_lifetime();
        leptos::task::spawn_local(async move {
            loop {
                let result = crate::net::api::fetch_progress(&config).await;
                if !lifetime.is_alive() {
                    break;
                }
                let interval = config.progress_poll_interval;
                let next = match result {
                    Ok(record) => {
                        progress.update(|p| p.apply(record));
                        progress.with_untracked(|p| p.next_poll_delay(&lifetime, interval))
                    }
                    Err(e) => {
                        leptos::logging::warn!("progress: {e}");
                        progress.with_untracked(|p| p.next_poll_delay_after_error(&lifetime, interval))
                    }
                };
                let Some(delay) = next else {
                    break;
                };
                gloo_timers::future::sleep(delay).await;
                if !lifetime.is_alive() {
                    break;
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <Show when=move || progress.with(ProgressState::is_visible)>
            {move || {
                progress
                    .get()
                    .record
                    .map(|record| {
                        let percent = record.progress;
                        view! {
                            <div class=format!("progress-bar {}", status_class(record.status)) role="progressbar"
                                aria-valuemin="0" aria-valuemax="100" aria-valuenow=percent.to_string()>
                                <div class="progress-bar__label">
                                    <span class="progress-bar__title">{record.title}</span>
                                    <span class="progress-bar__percent">{format!("{percent}%")}</span>
                                </div>
                                <div class="progress-bar__track">
                                    <div class="progress-bar__fill" style=format!("width: {percent}%")></div>
                                </div>
                            </div>
                        }
                    })
            }}
        </Show>
    }
}
