//! Streams Page
//!
//! Lists research streams from /api/v1/streams with create and delete.

use leptos::*;
use serde::Serialize;
use uuid::Uuid;

use crate::api::types::{ApiResponse, StreamSummary};
use crate::api::ApiClient;
use crate::chat::context::{use_chat_bridge, PageContext};
use crate::components::Modal;

#[derive(Debug, Clone, Serialize)]
struct CreateStream {
    name: String,
    description: String,
}

/// Streams page
#[component]
pub fn Streams() -> impl IntoView {
    let (streams, set_streams) = create_signal::<Vec<StreamSummary>>(Vec::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    // Create modal state
    let (show_create, set_show_create) = create_signal(false);
    let (new_name, set_new_name) = create_signal(String::new());
    let (new_description, set_new_description) = create_signal(String::new());
    let (creating, set_creating) = create_signal(false);

    let bridge = use_chat_bridge();
    bridge.context.set(PageContext::new("streams"));

    let fetch_streams = move || {
        spawn_local(async move {
            let client = ApiClient::new();
            match client
                .get::<ApiResponse<Vec<StreamSummary>>>("/api/v1/streams")
                .await
            {
                Ok(resp) => {
                    set_streams.set(resp.data);
                    set_error.set(None);
                }
                Err(e) => {
                    gloo_console::error!("Failed to fetch streams:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // Initial fetch
    create_effect(move |_| {
        fetch_streams();
    });

    let navigate = leptos_router::use_navigate();
    let create_stream = store_value(move |_: ev::MouseEvent| {
        let name = new_name.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        let description = new_description.get_untracked();
        let navigate = navigate.clone();

        spawn_local(async move {
            set_creating.set(true);
            let client = ApiClient::new();
            let body = CreateStream { name, description };
            match client
                .post::<StreamSummary, _>("/api/v1/streams", &body)
                .await
            {
                Ok(created) => {
                    navigate(&format!("/streams/{}/edit", created.id), Default::default());
                }
                Err(e) => {
                    gloo_console::error!("Failed to create stream:", e.to_string());
                    set_error.set(Some(e.to_string()));
                    set_show_create.set(false);
                }
            }
            set_creating.set(false);
        });
    });

    let delete_stream = move |id: Uuid| {
        spawn_local(async move {
            let client = ApiClient::new();
            match client.delete(&format!("/api/v1/streams/{}", id)).await {
                Ok(()) => fetch_streams(),
                Err(e) => {
                    gloo_console::error!("Failed to delete stream:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-theme-primary">"Research Streams"</h1>
                    <p class="text-theme-secondary mt-1">"Configured topics with recurring reports"</p>
                </div>
                <button
                    class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700"
                    on:click=move |_| {
                        set_new_name.set(String::new());
                        set_new_description.set(String::new());
                        set_show_create.set(true);
                    }
                >
                    "New Stream"
                </button>
            </div>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            // Loading indicator
            <Show when=move || loading.get()>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <div class="h-40 rounded-xl bg-theme-elevated animate-pulse"></div>
                    <div class="h-40 rounded-xl bg-theme-elevated animate-pulse"></div>
                    <div class="h-40 rounded-xl bg-theme-elevated animate-pulse"></div>
                </div>
            </Show>

            // Stream grid
            <Show when=move || !loading.get()>
                <Show
                    when=move || !streams.get().is_empty()
                    fallback=|| view! {
                        <div class="text-center py-16 text-theme-muted">
                            <p class="text-xl">"No streams yet"</p>
                            <p class="text-sm mt-2">"Create one to start collecting research."</p>
                        </div>
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For
                            each=move || streams.get()
                            key=|stream| stream.id
                            let:stream
                        >
                            <StreamCard stream=stream.clone() on_delete=delete_stream />
                        </For>
                    </div>
                </Show>
            </Show>

            // Create modal
            <Show when=move || show_create.get()>
                <Modal title="New Research Stream" on_close=move || set_show_create.set(false)>
                    <div class="space-y-4">
                        <div>
                            <label class="block text-sm font-medium text-theme-secondary mb-1">"Name"</label>
                            <input
                                type="text"
                                class="w-full px-3 py-2 bg-theme-base border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                                placeholder="e.g. Battery supply chain"
                                prop:value=move || new_name.get()
                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-theme-secondary mb-1">"Description"</label>
                            <textarea
                                class="w-full px-3 py-2 bg-theme-base border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 h-24"
                                placeholder="What should this stream keep track of?"
                                prop:value=move || new_description.get()
                                on:input=move |ev| set_new_description.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="flex justify-end gap-2">
                            <button
                                class="px-4 py-2 bg-theme-elevated rounded-lg hover:bg-theme-base"
                                on:click=move |_| set_show_create.set(false)
                            >
                                "Cancel"
                            </button>
                            <button
                                class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50"
                                disabled=move || creating.get() || new_name.get().trim().is_empty()
                                on:click=move |ev| create_stream.with_value(|f| f(ev))
                            >
                                {move || if creating.get() { "Creating..." } else { "Create" }}
                            </button>
                        </div>
                    </div>
                </Modal>
            </Show>
        </div>
    }
}

/// Stream summary card
#[component]
fn StreamCard<F>(stream: StreamSummary, on_delete: F) -> impl IntoView
where
    F: Fn(Uuid) + Copy + 'static,
{
    let status_class = match stream.status.as_str() {
        "active" => "bg-green-900 text-green-300",
        "paused" => "bg-yellow-900 text-yellow-300",
        "error" => "bg-red-900 text-red-300",
        _ => "bg-theme-elevated text-theme-secondary",
    };

    let id = stream.id;
    let updated = stream
        .updated_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());

    view! {
        <div class="bg-theme-card rounded-xl border border-theme-default hover:border-blue-500/50 transition-colors p-6 space-y-4">
            <div class="flex items-start justify-between">
                <div class="min-w-0">
                    <h3 class="text-lg font-bold text-theme-primary truncate">{stream.name.clone()}</h3>
                    <p class="text-sm text-theme-secondary mt-1 line-clamp-2">{stream.description.clone()}</p>
                </div>
                <span class={format!("px-2 py-1 text-xs font-medium rounded ml-2 {}", status_class)}>
                    {stream.status.clone()}
                </span>
            </div>

            <div class="flex items-center justify-between text-xs text-theme-muted">
                <span>{format!("{} report(s)", stream.report_count)}</span>
                <span>"Updated " {updated}</span>
            </div>

            <div class="flex items-center justify-between pt-2 border-t border-theme-default">
                <a
                    href={format!("/streams/{}/edit", id)}
                    class="text-sm text-blue-400 hover:text-blue-300"
                >
                    "Configure"
                </a>
                <button
                    class="text-sm text-theme-muted hover:text-red-400"
                    on:click=move |_| on_delete(id)
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
