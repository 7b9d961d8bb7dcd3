//! Chat panel: message history, live updates, and the send box.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the panel fetches history and subscribes to `/api/chat/updates`.
//! Sends are optimistic: the user's message is appended before the request
//! goes out, and a failure keeps it marked undelivered. Assistant replies
//! render as Markdown with raw HTML stripped.

use leptos::prelude::*;
use model::ChatMessage;

use crate::config::ClientConfig;
use crate::state::chat::ChatState;
use crate::state::toasts::ToastState;
use crate::util::clock;
use crate::util::format::clock_time;
use crate::util::markdown;
use crate::util::scroll::ScrollFollow;

pub const SEND_FAILED: &str = "Failed to send message. Please try again.";
pub const HISTORY_FAILED: &str = "Failed to load chat history";
pub const UPDATES_UNAVAILABLE: &str = "Live chat updates unavailable";

#[component]
pub fn ChatPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();

    let input = RwSignal::new(String::new());
    let follow = RwSignal::new(ScrollFollow::default());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    let lifetime = crate::util::lifecycle::component_lifetime();

    #[cfg(feature = "hydrate")]
    {
        use model::{ChatUpdate, paths};

        use crate::net::updates::LinkEvent;

        spawn_history_fetch(config.clone(), lifetime.clone(), chat, Some(toasts));

        let link_config = config.clone();
        let link_lifetime = lifetime.clone();
        crate::net::updates::subscribe::<ChatUpdate, _, _>(
            &config,
            paths::CHAT_UPDATES,
            lifetime.clone(),
            move |update| chat.update(|c| c.apply_update(update)),
            move |event| match event {
                LinkEvent::Reconnected => spawn_history_fetch(link_config.clone(), link_lifetime.clone(), chat, None),
                LinkEvent::FirstAttemptFailed => toasts.update(|t| {
                    t.error(UPDATES_UNAVAILABLE);
                }),
            },
        );
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (&config, toasts);

    // Follow the tail when the list grows.
    Effect::new(move |previous: Option<usize>| {
        let len = chat.with(|c| c.messages.len());
        let _ = chat.with(|c| c.typing);
        let grew = previous.is_none_or(|p| len > p);
        if grew && follow.try_update(ScrollFollow::on_growth).unwrap_or(false) {
            scroll_to_bottom(messages_ref);
        }
        len
    });

    let on_scroll = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get_untracked() {
                let distance = crate::util::scroll::distance_from_bottom(
                    f64::from(el.scroll_height()),
                    f64::from(el.scroll_top()),
                    f64::from(el.client_height()),
                );
                follow.update(|f| f.on_scroll(distance));
            }
        }
    };

    let on_jump = move |_| {
        follow.update(ScrollFollow::jump);
        scroll_to_bottom(messages_ref);
    };

    let do_send = Callback::new(move |()| {
        let id = clock::new_id();
        let Some(content) = chat
            .try_update(|c| c.begin_send(&input.get_untracked(), id.clone(), clock::now_ms()))
            .flatten()
        else {
            return;
        };
        input.set(String::new());
        follow.update(ScrollFollow::jump);
        scroll_to_bottom(messages_ref);

        #[cfg(feature = "hydrate")]
        {
            let config = config.clone();
            let lifetime = lifetime.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::send_chat_message(&config, &content, &id).await;
                if !lifetime.is_alive() {
                    return;
                }
                match result {
                    Ok(reply) => chat.update(|c| c.complete_send(&id, reply)),
                    Err(e) => {
                        leptos::logging::warn!("chat send: {e}");
                        chat.update(|c| c.fail_send(&id));
                        toasts.update(|t| {
                            t.error(SEND_FAILED);
                        });
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = content;
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send.run(());
        }
    };

    let can_send = move || chat.with(|c| c.can_send(&input.get()));

    view! {
        <div class="chat-panel">
            <div class="chat-panel__messages" node_ref=messages_ref on:scroll=on_scroll>
                {move || {
                    let state = chat.get();
                    if state.messages.is_empty() {
                        return view! {
                            <div class="chat-panel__empty">"Start a conversation"</div>
                        }
                            .into_any();
                    }
                    state
                        .messages
                        .iter()
                        .map(|msg| {
                            let undelivered = state.is_undelivered(&msg.id);
                            let pending = state.is_provisional(&msg.id);
                            render_message(msg, pending, undelivered)
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}

                {move || {
                    chat.get()
                        .typing
                        .then(|| view! { <div class="chat-panel__typing">"Assistant is typing..."</div> })
                }}
            </div>

            <Show when=move || follow.get().show_jump()>
                <button class="btn chat-panel__jump" on:click=on_jump>
                    "Jump to latest"
                </button>
            </Show>

            <div class="chat-panel__input-row">
                <textarea
                    class="chat-panel__input"
                    rows="1"
                    placeholder="Type your message..."
                    disabled=move || chat.get().loading
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button
                    class="btn btn--primary chat-panel__send"
                    on:click=move |_| do_send.run(())
                    disabled=move || !can_send()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

/// Fetch history and merge it in. Failures toast only when `toasts` is given.
#[cfg(feature = "hydrate")]
fn spawn_history_fetch(
    config: ClientConfig,
    lifetime: crate::util::lifecycle::Lifetime,
    chat: RwSignal<ChatState>,
    toasts: Option<RwSignal<ToastState>>,
) {
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_chat_history(&config).await;
        if !lifetime.is_alive() {
            return;
        }
        match result {
            Ok(history) => chat.update(|c| c.load_history(history)),
            Err(e) => {
                leptos::logging::warn!("chat history: {e}");
                if let Some(toasts) = toasts {
                    toasts.update(|t| {
                        t.error(HISTORY_FAILED);
                    });
                }
            }
        }
    });
}

fn render_message(msg: &ChatMessage, pending: bool, undelivered: bool) -> AnyView {
    let is_user = msg.is_from_user();
    let time = clock_time(msg.timestamp);
    let body = if is_user {
        view! { <span class="chat-panel__text">{msg.content.clone()}</span> }.into_any()
    } else {
        let rendered = markdown::to_html(&msg.content);
        view! { <div class="chat-panel__markdown-body" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div
            class="chat-panel__message"
            class:chat-panel__message--user=is_user
            class:chat-panel__message--assistant=!is_user
            class:chat-panel__message--pending=pending
        >
            <div class="chat-panel__content">{body}</div>
            <div class="chat-panel__meta">
                <span class="chat-panel__time">{time}</span>
                {undelivered.then(|| view! { <span class="chat-panel__undelivered">"Not delivered"</span> })}
            </div>
        </div>
    }
    .into_any()
}

fn scroll_to_bottom(messages_ref: NodeRef<leptos::html::Div>) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = messages_ref.get_untracked() {
            el.set_scroll_top(el.scroll_height());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = messages_ref;
}
