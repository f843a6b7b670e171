//! Chat Tray
//!
//! Floating assistant available on every page. Wires the stream transport
//! into the session reducer, surfaces structured payloads through the
//! handler registries, and syncs with the conversation store.

use gloo_storage::Storage;
use leptos::*;
use uuid::Uuid;

use crate::api::conversations::{ConversationApi, ConversationSummary};
use crate::api::stream::{ChatRequest, ChatStreamController, ChatStreamEvent};
use crate::api::ApiClient;
use crate::chat::context::use_chat_bridge;
use crate::chat::payload::{
    resolve_handler, HandlerRegistry, PayloadActions, PayloadLifecycle, PayloadPhase,
};
use crate::chat::session::ChatSession;
use crate::components::MessageBubble;

/// Floating chat tray. Pages may pass a local handler map that shadows the
/// globally registered payload handlers.
#[component]
pub fn ChatTray(#[prop(optional)] local_handlers: Option<HandlerRegistry>) -> impl IntoView {
    let bridge = use_chat_bridge();
    let local = local_handlers.unwrap_or_default();

    let session = create_rw_signal(ChatSession::new());
    let lifecycle = create_rw_signal(PayloadLifecycle::new());
    let (input, set_input) = create_signal(String::new());
    let (open, set_open) = create_signal(false);
    let (show_history, set_show_history) = create_signal(false);
    let (conversations, set_conversations) = create_signal::<Vec<ConversationSummary>>(Vec::new());
    let (conversation_id, set_conversation_id) = create_signal::<Option<Uuid>>(None);

    let controller = store_value(ChatStreamController::new(
        ApiClient::new().base_url().to_string(),
    ));

    // Docking side comes from the settings page
    let tray_side = gloo_storage::LocalStorage::get::<String>("rill_tray_side")
        .unwrap_or_else(|_| "right".to_string());
    let dock_class = if tray_side == "left" { "left-6" } else { "right-6" };

    // Send one user turn. Starting a new stream supersedes any in-flight one.
    let send = {
        let bridge = bridge.clone();
        move |text: String| {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() {
                return;
            }

            let context = bridge.context.get_untracked().to_value();
            session.update(|s| s.begin_turn(trimmed.clone()));

            spawn_local(async move {
                // First turn of a fresh session creates the persisted record.
                let conversation = match conversation_id.get_untracked() {
                    Some(id) => Some(id),
                    None => {
                        let title: String = trimmed.chars().take(48).collect();
                        match ConversationApi::new().create(Some(&title)).await {
                            Ok(summary) => {
                                set_conversation_id.set(Some(summary.conversation_id));
                                Some(summary.conversation_id)
                            }
                            Err(e) => {
                                gloo_console::warn!(
                                    "Continuing without a saved conversation:",
                                    e.to_string()
                                );
                                None
                            }
                        }
                    }
                };

                let request = ChatRequest {
                    message: trimmed,
                    conversation_id: conversation,
                    context,
                };
                let result = controller.with_value(|c| {
                    c.start(&request, move |event| session.update(|s| s.apply(event)))
                });
                if let Err(err) = result {
                    session.update(|s| {
                        s.apply(ChatStreamEvent::Error {
                            message: err.to_string(),
                        })
                    });
                }
            });
        }
    };

    let on_submit = {
        let send = send.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let text = input.get_untracked();
            set_input.set(String::new());
            send(text);
        }
    };

    let cancel = move |_| {
        controller.with_value(|c| c.cancel());
    };

    let refresh_conversations = move || {
        spawn_local(async move {
            match ConversationApi::new().list().await {
                Ok(list) => set_conversations.set(list),
                Err(e) => gloo_console::error!("Failed to list conversations:", e.to_string()),
            }
        });
    };

    // Fetch the history list whenever the picker opens.
    create_effect(move |_| {
        if show_history.get() {
            refresh_conversations();
        }
    });

    let new_chat = move || {
        controller.with_value(|c| c.cancel());
        session.update(|s| s.reset());
        lifecycle.update(|lc| lc.reset());
        set_conversation_id.set(None);
        set_show_history.set(false);
    };

    let load_conversation = move |id: Uuid| {
        controller.with_value(|c| c.cancel());
        spawn_local(async move {
            match ConversationApi::new().get(id).await {
                Ok(conversation) => {
                    session.update(|s| s.load(conversation.messages));
                    lifecycle.update(|lc| lc.reset());
                    set_conversation_id.set(Some(id));
                    set_show_history.set(false);
                }
                Err(e) => gloo_console::error!("Failed to load conversation:", e.to_string()),
            }
        });
    };

    let delete_conversation = move |id: Uuid| {
        spawn_local(async move {
            match ConversationApi::new().delete(id).await {
                Ok(()) => {
                    if conversation_id.get_untracked() == Some(id) {
                        controller.with_value(|c| c.cancel());
                        session.update(|s| s.reset());
                        lifecycle.update(|lc| lc.reset());
                        set_conversation_id.set(None);
                    }
                    match ConversationApi::new().list().await {
                        Ok(list) => set_conversations.set(list),
                        Err(e) => {
                            gloo_console::error!("Failed to refresh conversations:", e.to_string())
                        }
                    }
                }
                Err(e) => gloo_console::error!("Failed to delete conversation:", e.to_string()),
            }
        });
    };

    // Derived payload state: latest message only, dismissals are sticky.
    let surfaced = {
        let local = local.clone();
        let global = bridge.handlers.clone();
        create_memo(move |_| {
            session.with(|s| {
                lifecycle.with(|lc| {
                    lc.current(s.messages(), |kind| {
                        local.contains(kind) || global.contains(kind)
                    })
                })
            })
        })
    };

    let payload_panel = {
        let local = local.clone();
        let global = bridge.handlers.clone();
        move || -> View {
            let Some((payload, PayloadPhase::Active)) = surfaced.get() else {
                return ().into_view();
            };

            let index = payload.message_index;
            let close =
                move |_| lifecycle.update(|lc| lc.dismiss(index));

            let Some(handler) = resolve_handler(&local, &global, &payload.kind) else {
                return view! {
                    <div class="border-t border-theme-default bg-theme-card p-4 space-y-2">
                        <div class="flex items-center justify-between">
                            <span class="text-sm font-medium text-theme-primary">{payload.kind.clone()}</span>
                            <button class="text-theme-muted hover:text-theme-primary" on:click=close>"✕"</button>
                        </div>
                        <p class="text-sm text-theme-muted">
                            "No handler is available for this payload on the current page."
                        </p>
                    </div>
                }
                .into_view();
            };

            let data = payload.data.clone();
            let accept = {
                let handler = handler.clone();
                let data = data.clone();
                move || {
                    if let Some(on_accept) = &handler.on_accept {
                        on_accept(&data);
                    }
                    lifecycle.update(|lc| lc.dismiss(index));
                }
            };
            let reject = {
                let handler = handler.clone();
                let data = data.clone();
                move || {
                    if let Some(on_reject) = &handler.on_reject {
                        on_reject(&data);
                    }
                    lifecycle.update(|lc| lc.dismiss(index));
                }
            };

            let actions = PayloadActions {
                accept: std::rc::Rc::new(accept.clone()),
                reject: std::rc::Rc::new(reject.clone()),
            };
            let body = (handler.render)(&data, &actions);

            let has_accept = handler.on_accept.is_some();
            let has_reject = handler.on_reject.is_some();

            view! {
                <div class={format!(
                    "border-t border-theme-default bg-theme-card p-4 space-y-3 max-h-72 overflow-y-auto {}",
                    handler.options.panel_width
                )}>
                    <div class="flex items-center justify-between">
                        <span class="text-sm font-medium text-theme-primary">
                            {handler.options.header_icon} " " {handler.options.header_title.clone()}
                        </span>
                        <button class="text-theme-muted hover:text-theme-primary" on:click=close>"✕"</button>
                    </div>
                    <div class="text-sm">{body}</div>
                    <div class="flex justify-end gap-2">
                        <Show when=move || has_reject>
                            {
                                let reject = reject.clone();
                                view! {
                                    <button
                                        class="px-3 py-1 text-sm bg-theme-elevated rounded hover:bg-theme-base"
                                        on:click=move |_| reject()
                                    >
                                        "Reject"
                                    </button>
                                }
                            }
                        </Show>
                        <Show when=move || has_accept>
                            {
                                let accept = accept.clone();
                                view! {
                                    <button
                                        class="px-3 py-1 text-sm bg-blue-600 text-white rounded hover:bg-blue-700"
                                        on:click=move |_| accept()
                                    >
                                        "Accept"
                                    </button>
                                }
                            }
                        </Show>
                    </div>
                </div>
            }
            .into_view()
        }
    };

    let send_for_bubbles = send.clone();

    view! {
        // Launcher button
        <Show when=move || !open.get()>
            <button
                class={format!("fixed bottom-6 {} z-40 w-14 h-14 rounded-full bg-blue-600 text-white text-2xl shadow-xl hover:bg-blue-700 transition-colors", dock_class)}
                on:click=move |_| set_open.set(true)
            >
                "✦"
                <Show when=move || matches!(surfaced.get(), Some((_, PayloadPhase::Pending)))>
                    <span class="absolute top-0 right-0 w-3 h-3 rounded-full bg-yellow-400" />
                </Show>
            </button>
        </Show>

        // Tray
        <Show when=move || open.get()>
            <div class={format!("fixed bottom-6 {} z-40 w-[26rem] h-[34rem] flex flex-col bg-theme-base border border-theme-default rounded-2xl shadow-2xl overflow-hidden", dock_class)}>
                // Header
                <div class="flex items-center justify-between px-4 py-3 bg-theme-card border-b border-theme-default">
                    <span class="font-semibold text-theme-primary">"Rill Assistant"</span>
                    <div class="flex items-center gap-2">
                        <button
                            class="text-sm text-theme-muted hover:text-theme-primary"
                            title="Conversations"
                            on:click=move |_| set_show_history.update(|v| *v = !*v)
                        >
                            "☰"
                        </button>
                        <button
                            class="text-sm text-theme-muted hover:text-theme-primary"
                            title="New chat"
                            on:click=move |_| new_chat()
                        >
                            "+"
                        </button>
                        <button
                            class="text-sm text-theme-muted hover:text-theme-primary"
                            on:click=move |_| set_open.set(false)
                        >
                            "✕"
                        </button>
                    </div>
                </div>

                // Conversation picker
                <Show when=move || show_history.get()>
                    <div class="max-h-40 overflow-y-auto border-b border-theme-default bg-theme-card/50">
                        <Show
                            when=move || !conversations.get().is_empty()
                            fallback=|| view! {
                                <p class="px-4 py-3 text-sm text-theme-muted">"No saved conversations"</p>
                            }
                        >
                            <For
                                each=move || conversations.get()
                                key=|c| c.conversation_id
                                let:conversation
                            >
                                {
                                    let id = conversation.conversation_id;
                                    let title = if conversation.title.is_empty() {
                                        id.to_string()[..8].to_string()
                                    } else {
                                        conversation.title.clone()
                                    };
                                    view! {
                                        <div class="flex items-center justify-between px-4 py-2 hover:bg-theme-elevated text-sm">
                                            <button
                                                class="flex-1 text-left truncate"
                                                on:click=move |_| load_conversation(id)
                                            >
                                                {title}
                                            </button>
                                            <button
                                                class="text-theme-muted hover:text-red-400 ml-2"
                                                on:click=move |_| delete_conversation(id)
                                            >
                                                "🗑"
                                            </button>
                                        </div>
                                    }
                                }
                            </For>
                        </Show>
                    </div>
                </Show>

                // Error banner
                <Show when=move || session.with(|s| s.error().is_some())>
                    <div class="px-4 py-2 bg-red-900/40 border-b border-red-800 text-red-200 text-sm">
                        {move || session.with(|s| s.error().unwrap_or_default().to_string())}
                    </div>
                </Show>

                // Transcript
                <div class="flex-1 overflow-y-auto p-4 space-y-3">
                    <For
                        each=move || {
                            session.with(|s| {
                                s.messages().iter().cloned().enumerate().collect::<Vec<_>>()
                            })
                        }
                        key=|entry| (entry.0, entry.1.timestamp)
                        let:entry
                    >
                        {
                            let send = send_for_bubbles.clone();
                            view! {
                                <MessageBubble
                                    message=entry.1
                                    on_suggest=move |action: String| send(action)
                                />
                            }
                        }
                    </For>

                    // Live streaming text
                    <Show when=move || session.with(|s| s.is_busy() && !s.streaming_text().is_empty())>
                        <div class="flex justify-start">
                            <div class="max-w-[85%] rounded-lg p-3 bg-theme-elevated">
                                <div class="text-xs font-medium text-theme-muted mb-1">"Rill"</div>
                                <p class="text-sm whitespace-pre-wrap">
                                    {move || session.with(|s| s.streaming_text().to_string())}
                                </p>
                            </div>
                        </div>
                    </Show>

                    // Status line
                    <Show when=move || session.with(|s| s.status().is_some())>
                        <p class="text-xs text-theme-muted italic">
                            {move || session.with(|s| s.status().unwrap_or_default().to_string())}
                        </p>
                    </Show>

                    // Tool progress
                    <Show when=move || session.with(|s| s.active_tool().is_some())>
                        <div class="flex items-center gap-2 text-xs text-theme-muted">
                            <div class="animate-spin rounded-full h-3 w-3 border-b-2 border-blue-500" />
                            <span class="font-mono">
                                {move || {
                                    session.with(|s| {
                                        s.active_tool()
                                            .map(|t| match &t.message {
                                                Some(msg) => format!("{}: {}", t.tool, msg),
                                                None => t.tool.clone(),
                                            })
                                            .unwrap_or_default()
                                    })
                                }}
                            </span>
                        </div>
                    </Show>
                </div>

                // Pending payload banner
                <Show when=move || matches!(surfaced.get(), Some((_, PayloadPhase::Pending)))>
                    <div class="flex items-center justify-between px-4 py-2 bg-blue-900/30 border-t border-blue-800 text-sm">
                        <span class="text-blue-200">
                            {move || {
                                surfaced
                                    .get()
                                    .map(|(p, _)| format!("Proposal ready: {}", p.kind))
                                    .unwrap_or_default()
                            }}
                        </span>
                        <div class="flex gap-2">
                            <button
                                class="px-2 py-1 text-xs bg-blue-600 text-white rounded hover:bg-blue-700"
                                on:click=move |_| {
                                    if let Some((p, _)) = surfaced.get_untracked() {
                                        lifecycle.update(|lc| lc.activate(p.message_index));
                                    }
                                }
                            >
                                "View"
                            </button>
                            <button
                                class="px-2 py-1 text-xs text-theme-muted hover:text-theme-primary"
                                on:click=move |_| {
                                    if let Some((p, _)) = surfaced.get_untracked() {
                                        lifecycle.update(|lc| lc.dismiss(p.message_index));
                                    }
                                }
                            >
                                "Dismiss"
                            </button>
                        </div>
                    </div>
                </Show>

                // Active payload panel
                {payload_panel.clone()}

                // Input
                <form on:submit=on_submit class="p-3 border-t border-theme-default bg-theme-card">
                    <div class="flex gap-2">
                        <input
                            type="text"
                            placeholder="Ask about this page..."
                            class="flex-1 px-3 py-2 bg-theme-base border border-theme-default rounded-lg text-sm focus:outline-none focus:border-blue-500"
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                        />
                        <Show
                            when=move || session.with(|s| s.is_busy())
                            fallback=move || view! {
                                <button
                                    type="submit"
                                    class="px-4 py-2 bg-blue-600 text-white rounded-lg text-sm hover:bg-blue-700 disabled:opacity-50"
                                    disabled=move || input.get().trim().is_empty()
                                >
                                    "Send"
                                </button>
                            }
                        >
                            <button
                                type="button"
                                class="px-4 py-2 bg-theme-elevated text-theme-primary rounded-lg text-sm hover:bg-red-900/40"
                                on:click=cancel
                            >
                                "Stop"
                            </button>
                        </Show>
                    </div>
                </form>
            </div>
        </Show>
    }
}
