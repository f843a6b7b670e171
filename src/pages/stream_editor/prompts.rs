//! Enrichment Prompts Tab
//!
//! Per-section prompt text with a small workbench: server defaults via
//! /api/v1/prompts/defaults and dry runs via /api/v1/prompts/test.

use leptos::*;
use uuid::Uuid;

use crate::api::types::{
    ApiResponse, PromptDefaults, PromptTestRequest, PromptTestResult, StreamConfig,
};
use crate::api::ApiClient;

/// Enrichment prompt editor
#[component]
pub fn PromptsTab(
    config: RwSignal<StreamConfig>,
    stream_id: Option<Uuid>,
) -> impl IntoView {
    let (defaults, set_defaults) = create_signal(PromptDefaults::default());
    let (selected_section, set_selected_section) = create_signal(String::new());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal::<Option<PromptTestResult>>(None);
    let (test_error, set_test_error) = create_signal::<Option<String>>(None);

    // Server defaults for the "Use default" shortcut
    create_effect(move |_| {
        spawn_local(async move {
            match ApiClient::new()
                .get::<ApiResponse<PromptDefaults>>("/api/v1/prompts/defaults")
                .await
            {
                Ok(resp) => set_defaults.set(resp.data),
                Err(e) => gloo_console::error!("Failed to fetch prompt defaults:", e.to_string()),
            }
        });
    });

    let run_test = move |_| {
        let section_id = selected_section.get_untracked();
        let (prompt, section_title) = config.with_untracked(|c| {
            let prompt = c
                .prompts
                .for_section(&section_id)
                .unwrap_or_default()
                .to_string();
            let title = c
                .taxonomy
                .sections
                .iter()
                .find(|s| s.id == section_id)
                .map(|s| s.title.clone())
                .unwrap_or_default();
            (prompt, title)
        });
        if prompt.trim().is_empty() {
            set_test_error.set(Some("Write a prompt before testing it.".to_string()));
            return;
        }

        spawn_local(async move {
            set_testing.set(true);
            set_test_error.set(None);
            set_test_result.set(None);

            let body = PromptTestRequest {
                prompt,
                section_title,
                stream_id,
            };
            match ApiClient::new()
                .post::<ApiResponse<PromptTestResult>, _>("/api/v1/prompts/test", &body)
                .await
            {
                Ok(resp) => set_test_result.set(Some(resp.data)),
                Err(e) => {
                    gloo_console::error!("Prompt test failed:", e.to_string());
                    set_test_error.set(Some(e.to_string()));
                }
            }
            set_testing.set(false);
        });
    };

    view! {
        <div class="space-y-6 max-w-3xl">
            <Show when=move || config.with(|c| c.taxonomy.sections.is_empty())>
                <p class="text-sm text-theme-muted py-4">
                    "Define taxonomy sections first; prompts attach to them."
                </p>
            </Show>

            // One prompt editor per taxonomy section
            {move || {
                config
                    .with(|c| c.taxonomy.sections.clone())
                    .into_iter()
                    .map(|section| {
                        let section_id = section.id.clone();
                        let id_for_input = section_id.clone();
                        let id_for_value = section_id.clone();
                        let id_for_default = section_id.clone();
                        view! {
                            <div class="bg-theme-card border border-theme-default rounded-lg p-4 space-y-2">
                                <div class="flex items-center justify-between">
                                    <label class="text-sm font-medium text-theme-primary">{section.title.clone()}</label>
                                    <button
                                        class="text-xs text-blue-400 hover:text-blue-300"
                                        on:click=move |_| {
                                            let template = defaults.get_untracked().section_prompt;
                                            let id = id_for_default.clone();
                                            config.update(|c| c.prompts.set(&id, template));
                                        }
                                    >
                                        "Use default"
                                    </button>
                                </div>
                                <textarea
                                    class="w-full px-3 py-2 bg-theme-base border border-theme-default rounded focus:outline-none focus:border-blue-500 text-sm h-24 font-mono"
                                    placeholder="How should content for this section be summarized and enriched?"
                                    prop:value=move || {
                                        config.with(|c| {
                                            c.prompts.for_section(&id_for_value).unwrap_or_default().to_string()
                                        })
                                    }
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        let id = id_for_input.clone();
                                        config.update(|c| c.prompts.set(&id, value));
                                    }
                                />
                            </div>
                        }
                    })
                    .collect_view()
            }}

            // Workbench
            <Show when=move || config.with(|c| !c.taxonomy.sections.is_empty())>
                <div class="bg-theme-card border border-theme-default rounded-lg p-4 space-y-3">
                    <h3 class="text-sm font-semibold text-theme-primary">"Prompt workbench"</h3>
                    <div class="flex gap-2">
                        <select
                            class="flex-1 px-3 py-2 bg-theme-base border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 text-sm"
                            on:change=move |ev| set_selected_section.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || selected_section.get().is_empty()>
                                "Pick a section..."
                            </option>
                            {move || {
                                config
                                    .with(|c| c.taxonomy.sections.clone())
                                    .into_iter()
                                    .map(|section| {
                                        let id = section.id.clone();
                                        let id_for_selected = section.id.clone();
                                        view! {
                                            <option
                                                value=id
                                                selected=move || selected_section.get() == id_for_selected
                                            >
                                                {section.title.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                        <button
                            class="px-4 py-2 bg-blue-600 text-white rounded-lg text-sm hover:bg-blue-700 disabled:opacity-50"
                            disabled=move || testing.get() || selected_section.get().is_empty()
                            on:click=run_test
                        >
                            {move || if testing.get() { "Running..." } else { "Dry run" }}
                        </button>
                    </div>

                    <Show when=move || test_error.get().is_some()>
                        <p class="text-sm text-theme-error">{move || test_error.get().unwrap_or_default()}</p>
                    </Show>

                    <Show when=move || test_result.get().is_some()>
                        {move || {
                            let result = test_result.get().unwrap_or_default();
                            let warnings = result.warnings.clone();
                            let has_warnings = !warnings.is_empty();
                            view! {
                                <div class="space-y-2">
                                    <Show when=move || has_warnings>
                                        <ul class="text-xs text-yellow-300 list-disc list-inside">
                                            {warnings.clone().into_iter().map(|w| view! { <li>{w}</li> }).collect_view()}
                                        </ul>
                                    </Show>
                                    <pre class="text-xs bg-theme-base rounded p-3 overflow-x-auto whitespace-pre-wrap font-mono">
                                        {result.rendered.clone()}
                                    </pre>
                                </div>
                            }
                        }}
                    </Show>
                </div>
            </Show>
        </div>
    }
}
