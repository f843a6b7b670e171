//! Stream Editor Page
//!
//! Multi-tab configuration editor over /api/v1/streams/:id/config: semantic
//! space, retrieval strategy, presentation taxonomy, and enrichment prompts.
//! Publishes its draft as page context and registers payload handlers so
//! the assistant can propose edits the user accepts into the form.

mod prompts;
mod retrieval;
mod semantic;
mod taxonomy;

use leptos::*;
use leptos_router::*;
use serde_json::json;
use uuid::Uuid;

use crate::api::types::{ApiResponse, RetrievalStrategy, StreamConfig, StreamSummary, Taxonomy};
use crate::api::ApiClient;
use crate::chat::context::{register_page_handler, use_chat_bridge, PageContext};
use crate::chat::payload::{PayloadHandler, RenderOptions};

use prompts::PromptsTab;
use retrieval::RetrievalTab;
use semantic::SemanticTab;
use taxonomy::TaxonomyTab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorTab {
    Semantic,
    Retrieval,
    Taxonomy,
    Prompts,
}

impl EditorTab {
    const ALL: [EditorTab; 4] = [
        EditorTab::Semantic,
        EditorTab::Retrieval,
        EditorTab::Taxonomy,
        EditorTab::Prompts,
    ];

    fn label(self) -> &'static str {
        match self {
            EditorTab::Semantic => "Semantic Space",
            EditorTab::Retrieval => "Retrieval",
            EditorTab::Taxonomy => "Taxonomy",
            EditorTab::Prompts => "Prompts",
        }
    }

    fn key(self) -> &'static str {
        match self {
            EditorTab::Semantic => "semantic",
            EditorTab::Retrieval => "retrieval",
            EditorTab::Taxonomy => "taxonomy",
            EditorTab::Prompts => "prompts",
        }
    }
}

/// Stream editor page
#[component]
pub fn StreamEditor() -> impl IntoView {
    let params = use_params_map();
    let stream_id =
        move || params.with(|p| p.get("id").and_then(|s| Uuid::parse_str(s).ok()));

    let config = create_rw_signal(StreamConfig::default());
    let (stream_name, set_stream_name) = create_signal(String::new());
    let (active_tab, set_active_tab) = create_signal(EditorTab::Semantic);
    let (loading, set_loading) = create_signal(true);
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (success, set_success) = create_signal(false);

    let bridge = use_chat_bridge();

    // Load stream metadata and config
    create_effect(move |_| {
        let Some(id) = stream_id() else {
            return;
        };
        spawn_local(async move {
            let client = ApiClient::new();

            match client
                .get::<StreamSummary>(&format!("/api/v1/streams/{}", id))
                .await
            {
                Ok(stream) => set_stream_name.set(stream.name),
                Err(e) => gloo_console::error!("Failed to fetch stream:", e.to_string()),
            }

            match client
                .get::<ApiResponse<StreamConfig>>(&format!("/api/v1/streams/{}/config", id))
                .await
            {
                Ok(resp) => config.set(resp.data),
                Err(e) => {
                    gloo_console::error!("Failed to fetch config:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    // Publish the draft so the assistant sees what is on screen
    {
        let bridge = bridge.clone();
        create_effect(move |_| {
            let Some(id) = stream_id() else {
                return;
            };
            let detail = json!({
                "tab": active_tab.get().key(),
                "config": config.get(),
            });
            bridge
                .context
                .set(PageContext::new("stream_editor").with_stream(id).with_detail(detail));
        });
    }

    // Assistant proposals this page can apply
    register_page_handler(
        &bridge,
        "taxonomy_edit",
        PayloadHandler::new(|data, _| {
            let titles: Vec<String> = data
                .get("sections")
                .and_then(|v| v.as_array())
                .map(|list| {
                    list.iter()
                        .filter_map(|s| s.get("title").and_then(|t| t.as_str()))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            view! {
                <div class="space-y-1">
                    <p class="text-theme-secondary">"Proposed section layout:"</p>
                    <ol class="list-decimal list-inside">
                        {titles.into_iter().map(|t| view! { <li>{t}</li> }).collect_view()}
                    </ol>
                </div>
            }
            .into_view()
        })
        .on_accept(move |data| match serde_json::from_value::<Taxonomy>(data.clone()) {
            Ok(taxonomy) => config.update(|c| c.taxonomy = taxonomy),
            Err(e) => gloo_console::error!("Rejected malformed taxonomy payload:", e.to_string()),
        })
        .on_reject(|_| ())
        .options(RenderOptions {
            header_title: "Schema edit".to_string(),
            ..Default::default()
        }),
    );

    register_page_handler(
        &bridge,
        "retrieval_proposal",
        PayloadHandler::new(|data, _| {
            let pretty = serde_json::to_string_pretty(data).unwrap_or_default();
            view! {
                <pre class="text-xs bg-theme-base rounded p-2 overflow-x-auto font-mono">{pretty}</pre>
            }
            .into_view()
        })
        .on_accept(move |data| {
            match serde_json::from_value::<RetrievalStrategy>(data.clone()) {
                Ok(retrieval) => config.update(|c| c.retrieval = retrieval),
                Err(e) => {
                    gloo_console::error!("Rejected malformed retrieval payload:", e.to_string())
                }
            }
        })
        .on_reject(|_| ())
        .options(RenderOptions {
            header_title: "Retrieval proposal".to_string(),
            ..Default::default()
        }),
    );

    register_page_handler(
        &bridge,
        "prompt_suggestion",
        PayloadHandler::new(|data, _| {
            let prompt = data
                .get("prompt")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            view! {
                <p class="text-theme-secondary whitespace-pre-wrap">{prompt}</p>
            }
            .into_view()
        })
        .on_accept(move |data| {
            let section_id = data.get("section_id").and_then(|v| v.as_str());
            let prompt = data.get("prompt").and_then(|v| v.as_str());
            if let (Some(section_id), Some(prompt)) = (section_id, prompt) {
                let section_id = section_id.to_string();
                let prompt = prompt.to_string();
                config.update(|c| c.prompts.set(&section_id, prompt));
            }
        })
        .on_reject(|_| ())
        .options(RenderOptions {
            header_title: "Prompt suggestion".to_string(),
            ..Default::default()
        }),
    );

    // Save the draft
    let save_config = move |_| {
        let Some(id) = stream_id() else {
            return;
        };
        let cfg = config.get_untracked();
        spawn_local(async move {
            set_saving.set(true);
            set_error.set(None);
            set_success.set(false);

            let client = ApiClient::new();
            match client
                .put::<ApiResponse<StreamConfig>, _>(
                    &format!("/api/v1/streams/{}/config", id),
                    &cfg,
                )
                .await
            {
                Ok(_) => {
                    set_saving.set(false);
                    set_success.set(true);
                    gloo_timers::future::TimeoutFuture::new(2_500).await;
                    set_success.set(false);
                }
                Err(e) => {
                    gloo_console::error!("Failed to save config:", e.to_string());
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center gap-4">
                <A href="/streams" class="p-2 hover:bg-theme-elevated rounded-lg transition-colors">
                    "← Back"
                </A>
                <div>
                    <h1 class="text-2xl font-bold text-theme-primary">
                        {move || {
                            let name = stream_name.get();
                            if name.is_empty() { "Stream Configuration".to_string() } else { name }
                        }}
                    </h1>
                    <p class="text-sm text-theme-muted">
                        {move || stream_id().map(|id| id.to_string()).unwrap_or_default()}
                    </p>
                </div>
            </div>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            // Success message
            <Show when=move || success.get()>
                <div class="bg-theme-success/10 border border-theme-success rounded-lg p-4 text-theme-success">
                    "Configuration saved."
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="text-center text-theme-muted py-8">"Loading configuration..."</div>
            </Show>

            <Show when=move || !loading.get()>
                // Tab bar
                <div class="flex space-x-1 border-b border-theme-default">
                    {EditorTab::ALL
                        .iter()
                        .map(|tab| {
                            let tab = *tab;
                            view! {
                                <button
                                    class=move || {
                                        if active_tab.get() == tab {
                                            "px-4 py-2 text-sm font-medium text-blue-400 border-b-2 border-blue-500"
                                        } else {
                                            "px-4 py-2 text-sm font-medium text-theme-secondary hover:text-theme-primary"
                                        }
                                    }
                                    on:click=move |_| set_active_tab.set(tab)
                                >
                                    {tab.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                // Active tab
                <div class="py-2">
                    {move || match active_tab.get() {
                        EditorTab::Semantic => view! { <SemanticTab config=config /> }.into_view(),
                        EditorTab::Retrieval => view! { <RetrievalTab config=config /> }.into_view(),
                        EditorTab::Taxonomy => view! { <TaxonomyTab config=config /> }.into_view(),
                        EditorTab::Prompts => {
                            view! { <PromptsTab config=config stream_id=stream_id() /> }.into_view()
                        }
                    }}
                </div>

                // Save bar
                <div class="flex justify-end pt-4 border-t border-theme-default">
                    <button
                        class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || saving.get()
                        on:click=save_config
                    >
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
