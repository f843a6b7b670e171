//! Presentation Taxonomy Tab

use leptos::*;
use uuid::Uuid;

use crate::api::types::{StreamConfig, TaxonomySection};

fn new_section_id() -> String {
    format!("sec-{}", &Uuid::new_v4().to_string()[..8])
}

/// Report layout editor: ordered sections with titles and descriptions
#[component]
pub fn TaxonomyTab(config: RwSignal<StreamConfig>) -> impl IntoView {
    let add_section = move |_| {
        config.update(|c| {
            c.taxonomy.sections.push(TaxonomySection {
                id: new_section_id(),
                title: "New section".to_string(),
                description: String::new(),
            });
        });
    };

    view! {
        <div class="space-y-4 max-w-3xl">
            <p class="text-sm text-theme-secondary">
                "Sections define the report layout, in order. Enrichment prompts attach per section."
            </p>

            {move || {
                let sections = config.with(|c| c.taxonomy.sections.clone());
                let count = sections.len();
                sections
                    .into_iter()
                    .enumerate()
                    .map(|(i, section)| {
                        view! {
                            <div class="bg-theme-card border border-theme-default rounded-lg p-4 space-y-3">
                                <div class="flex items-center gap-2">
                                    <span class="text-xs font-mono text-theme-muted w-6">{format!("{}.", i + 1)}</span>
                                    <input
                                        type="text"
                                        class="flex-1 px-3 py-1.5 bg-theme-base border border-theme-default rounded focus:outline-none focus:border-blue-500 text-sm font-medium"
                                        prop:value=section.title.clone()
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            config.update(|c| {
                                                if let Some(s) = c.taxonomy.sections.get_mut(i) {
                                                    s.title = value;
                                                }
                                            });
                                        }
                                    />
                                    <button
                                        class="px-2 text-theme-muted hover:text-theme-primary disabled:opacity-30"
                                        disabled=move || i == 0
                                        title="Move up"
                                        on:click=move |_| {
                                            config.update(|c| {
                                                if i > 0 && i < c.taxonomy.sections.len() {
                                                    c.taxonomy.sections.swap(i, i - 1);
                                                }
                                            });
                                        }
                                    >
                                        "↑"
                                    </button>
                                    <button
                                        class="px-2 text-theme-muted hover:text-theme-primary disabled:opacity-30"
                                        disabled=move || i + 1 >= count
                                        title="Move down"
                                        on:click=move |_| {
                                            config.update(|c| {
                                                if i + 1 < c.taxonomy.sections.len() {
                                                    c.taxonomy.sections.swap(i, i + 1);
                                                }
                                            });
                                        }
                                    >
                                        "↓"
                                    </button>
                                    <button
                                        class="px-2 text-theme-muted hover:text-red-400"
                                        title="Remove"
                                        on:click=move |_| {
                                            config.update(|c| {
                                                if i < c.taxonomy.sections.len() {
                                                    c.taxonomy.sections.remove(i);
                                                }
                                            });
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                                <textarea
                                    class="w-full px-3 py-1.5 bg-theme-base border border-theme-default rounded focus:outline-none focus:border-blue-500 text-sm h-16"
                                    placeholder="What belongs in this section?"
                                    prop:value=section.description.clone()
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        config.update(|c| {
                                            if let Some(s) = c.taxonomy.sections.get_mut(i) {
                                                s.description = value;
                                            }
                                        });
                                    }
                                />
                            </div>
                        }
                    })
                    .collect_view()
            }}

            <button
                class="w-full py-2 border border-dashed border-theme-default rounded-lg text-sm text-theme-muted hover:text-theme-primary hover:border-blue-500/50"
                on:click=add_section
            >
                "+ Add section"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_section_id_shape() {
        let id = new_section_id();
        assert!(id.starts_with("sec-"));
        assert_eq!(id.len(), "sec-".len() + 8);
    }
}
