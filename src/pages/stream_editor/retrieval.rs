//! Retrieval Strategy Tab

use leptos::*;

use crate::api::types::{SourceToggle, StreamConfig};
use crate::components::ToggleSwitch;

/// Derive a stable key for a newly added source from its label.
fn source_key(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Retrieval strategy form: how material is gathered
#[component]
pub fn RetrievalTab(config: RwSignal<StreamConfig>) -> impl IntoView {
    let (new_source, set_new_source) = create_signal(String::new());

    let add_source = move |_| {
        let label = new_source.get_untracked().trim().to_string();
        if label.is_empty() {
            return;
        }
        let key = source_key(&label);
        config.update(|c| {
            if !c.retrieval.sources.iter().any(|s| s.key == key) {
                c.retrieval.sources.push(SourceToggle {
                    key,
                    label,
                    enabled: true,
                });
            }
        });
        set_new_source.set(String::new());
    };

    view! {
        <div class="space-y-6 max-w-3xl">
            // Sources
            <div>
                <label class="block text-sm font-medium text-theme-secondary mb-2">"Sources"</label>
                <div class="space-y-2">
                    {move || {
                        config
                            .with(|c| c.retrieval.sources.clone())
                            .into_iter()
                            .enumerate()
                            .map(|(i, source)| {
                                view! {
                                    <div class="flex items-center justify-between px-4 py-2 bg-theme-card border border-theme-default rounded-lg">
                                        <div>
                                            <span class="text-sm text-theme-primary">{source.label.clone()}</span>
                                            <span class="text-xs font-mono text-theme-muted ml-2">{source.key.clone()}</span>
                                        </div>
                                        <div class="flex items-center gap-3">
                                            <ToggleSwitch
                                                checked=move || {
                                                    config.with(|c| {
                                                        c.retrieval.sources.get(i).map(|s| s.enabled).unwrap_or(false)
                                                    })
                                                }
                                                on_change=move |v| {
                                                    config.update(|c| {
                                                        if let Some(s) = c.retrieval.sources.get_mut(i) {
                                                            s.enabled = v;
                                                        }
                                                    })
                                                }
                                            />
                                            <button
                                                class="text-theme-muted hover:text-red-400 text-sm"
                                                on:click=move |_| {
                                                    config.update(|c| {
                                                        if i < c.retrieval.sources.len() {
                                                            c.retrieval.sources.remove(i);
                                                        }
                                                    })
                                                }
                                            >
                                                "✕"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <div class="flex gap-2 mt-3">
                    <input
                        type="text"
                        class="flex-1 px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 text-sm"
                        placeholder="Add a source (e.g. arXiv)"
                        prop:value=move || new_source.get()
                        on:input=move |ev| set_new_source.set(event_target_value(&ev))
                    />
                    <button
                        class="px-4 py-2 bg-theme-elevated rounded-lg hover:bg-theme-base text-sm"
                        on:click=add_source
                    >
                        "Add"
                    </button>
                </div>
            </div>

            // Query expansion
            <div class="flex items-center justify-between py-3 border-y border-theme-default">
                <div>
                    <p class="font-medium text-theme-primary">"Query expansion"</p>
                    <p class="text-sm text-theme-secondary">"Broaden queries with related terminology"</p>
                </div>
                <ToggleSwitch
                    checked=move || config.with(|c| c.retrieval.query_expansion)
                    on_change=move |v| config.update(|c| c.retrieval.query_expansion = v)
                />
            </div>

            // Recency weight
            <div>
                <div class="flex items-center justify-between mb-1">
                    <label class="text-sm font-medium text-theme-secondary">"Recency weight"</label>
                    <span class="text-sm font-mono text-theme-muted">
                        {move || format!("{:.2}", config.with(|c| c.retrieval.recency_weight))}
                    </span>
                </div>
                <input
                    type="range"
                    min="0"
                    max="1"
                    step="0.05"
                    class="w-full"
                    prop:value=move || config.with(|c| c.retrieval.recency_weight.to_string())
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<f32>() {
                            config.update(|c| c.retrieval.recency_weight = value);
                        }
                    }
                />
            </div>

            // Max results + cadence
            <div class="grid grid-cols-2 gap-6">
                <div>
                    <label class="block text-sm font-medium text-theme-secondary mb-1">"Max results per run"</label>
                    <input
                        type="number"
                        min="1"
                        class="w-full px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                        prop:value=move || config.with(|c| c.retrieval.max_results.to_string())
                        on:input=move |ev| {
                            if let Ok(value) = event_target_value(&ev).parse::<usize>() {
                                config.update(|c| c.retrieval.max_results = value.max(1));
                            }
                        }
                    />
                </div>
                <div>
                    <label class="block text-sm font-medium text-theme-secondary mb-1">"Refresh cadence"</label>
                    <select
                        class="w-full px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            config.update(|c| c.retrieval.cadence = value);
                        }
                    >
                        <option value="hourly" selected=move || config.with(|c| c.retrieval.cadence == "hourly")>"Hourly"</option>
                        <option value="daily" selected=move || config.with(|c| c.retrieval.cadence == "daily")>"Daily"</option>
                        <option value="weekly" selected=move || config.with(|c| c.retrieval.cadence == "weekly")>"Weekly"</option>
                    </select>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_slugifies() {
        assert_eq!(source_key("Hacker News"), "hacker_news");
        assert_eq!(source_key("  arXiv "), "arxiv");
    }
}
