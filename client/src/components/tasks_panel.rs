//! Tasks panel: active tasks, a collapsible completed group, live updates.

#[cfg(test)]
#[path = "tasks_panel_test.rs"]
mod tasks_panel_test;

use leptos::prelude::*;
use model::{Priority, TaskStatus, TodoTask};

use crate::config::ClientConfig;
use crate::state::tasks::TasksState;
use crate::state::toasts::ToastState;
use crate::util::clock;
use crate::util::format::relative_time;

pub const LOAD_FAILED: &str = "Failed to load tasks";
pub const EMPTY_TASKS: &str = "No tasks yet";
pub const UPDATES_UNAVAILABLE: &str = "Live task updates unavailable";

#[must_use]
pub fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::InProgress => "◐",
        TaskStatus::Completed => "✓",
        TaskStatus::Failed => "✕",
    }
}

#[must_use]
pub fn priority_class(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "tasks-panel__task--high",
        Some(Priority::Medium) => "tasks-panel__task--medium",
        Some(Priority::Low) => "tasks-panel__task--low",
        None => "",
    }
}

#[component]
pub fn TasksPanel() -> impl IntoView {
    let tasks = expect_context::<RwSignal<TasksState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();

    // Relative times are recomputed against this clock.
    let now = RwSignal::new(clock::now_ms());

    #[cfg(feature = "hydrate")]
    {
        use model::paths;

        use crate::net::updates::LinkEvent;
        use crate::state::tasks::TaskUpdateOutcome;

        let lifetime = crate::util::lifecycle::component_lifetime();

        spawn_tasks_fetch(config.clone(), lifetime.clone(), tasks, Some(toasts));

        let policy = config.unknown_task_policy;
        let link_config = config.clone();
        let link_lifetime = lifetime.clone();
        crate::net::updates::subscribe::<TodoTask, _, _>(
            &config,
            paths::TASK_UPDATES,
            lifetime.clone(),
            move |task| {
                let id = task.id.clone();
                let outcome = tasks.try_update(|t| t.apply_update(task, policy, clock::now_ms()));
                match outcome {
                    Some(TaskUpdateOutcome::IgnoredUnknown) => {
                        leptos::logging::warn!("tasks: update for unknown task {id} ignored");
                    }
                    Some(TaskUpdateOutcome::RejectedRegression { from, to }) => {
                        leptos::logging::warn!("tasks: rejected {id} {} -> {}", from.as_str(), to.as_str());
                    }
                    _ => now.set(clock::now_ms()),
                }
            },
            move |event| match event {
                LinkEvent::Reconnected => spawn_tasks_fetch(link_config.clone(), link_lifetime.clone(), tasks, None),
                LinkEvent::FirstAttemptFailed => toasts.update(|t| {
                    t.error(UPDATES_UNAVAILABLE);
                }),
            },
        );

        leptos::task::spawn_local(async move {
            while lifetime.is_alive() {
                gloo_timers::future::sleep(std::time::Duration::from_secs(60)).await;
                if lifetime.is_alive() {
                    now.set(clock::now_ms());
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (config, toasts);

    view! {
        <div class="tasks-panel">
            <h2 class="tasks-panel__title">"Tasks"</h2>
            {move || {
                let state = tasks.get();
                if state.tasks.is_empty() {
                    return view! { <p class="tasks-panel__empty">{EMPTY_TASKS}</p> }.into_any();
                }
                let current = now.get();
                let active = state
                    .active()
                    .into_iter()
                    .map(|task| render_task(task, current))
                    .collect::<Vec<_>>();
                let completed = state.completed();
                let has_completed = !completed.is_empty();
                let completed_rows = state
                    .show_completed
                    .then(|| completed.into_iter().map(|task| render_task(task, current)).collect::<Vec<_>>());

                view! {
                    <ul class="tasks-panel__list">{active}</ul>
                    {has_completed
                        .then(|| {
                            view! {
                                <button
                                    class="tasks-panel__disclosure"
                                    aria-expanded=state.show_completed.to_string()
                                    on:click=move |_| tasks.update(TasksState::toggle_completed)
                                >
                                    {if state.show_completed { "▾ " } else { "▸ " }}
                                    {state.completed_label()}
                                </button>
                            }
                        })}
                    {completed_rows.map(|rows| view! { <ul class="tasks-panel__list tasks-panel__list--completed">{rows}</ul> })}
                }
                    .into_any()
            }}
        </div>
    }
}

/// Fetch the list and replace local state. Failures toast only when
/// `toasts` is given.
#[cfg(feature = "hydrate")]
fn spawn_tasks_fetch(
    config: ClientConfig,
    lifetime: crate::util::lifecycle::Lifetime,
    tasks: RwSignal<TasksState>,
    toasts: Option<RwSignal<ToastState>>,
) {
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_tasks(&config).await;
        if !lifetime.is_alive() {
            return;
        }
        match result {
            Ok(list) => tasks.update(|t| t.load(list, clock::now_ms())),
            Err(e) => {
                leptos::logging::warn!("tasks: {e}");
                if let Some(toasts) = toasts {
                    toasts.update(|t| {
                        t.error(LOAD_FAILED);
                    });
                }
            }
        }
    });
}

fn render_task(task: TodoTask, now: model::Timestamp) -> AnyView {
    let when = match task.completed_at {
        Some(done) if task.is_completed() => format!("Completed {}", relative_time(done, now)),
        _ => format!("Created {}", relative_time(task.created_at, now)),
    };
    let class = format!(
        "tasks-panel__task tasks-panel__task--{} {}",
        task.status.as_str(),
        priority_class(task.priority)
    );

    view! {
        <li class=class>
            <span class="tasks-panel__icon" aria-label=task.status.as_str()>
                {status_icon(task.status)}
            </span>
            <div class="tasks-panel__body">
                <span class="tasks-panel__task-title">{task.title}</span>
                {task.description.map(|d| view! { <p class="tasks-panel__description">{d}</p> })}
                <span class="tasks-panel__time">{when}</span>
            </div>
        </li>
    }
    .into_any()
}
