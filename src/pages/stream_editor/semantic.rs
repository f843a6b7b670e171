//! Semantic Space Tab

use leptos::*;

use crate::api::types::StreamConfig;

/// Parse a comma-separated term list into trimmed, non-empty entries.
fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Semantic space form: what the stream is about
#[component]
pub fn SemanticTab(config: RwSignal<StreamConfig>) -> impl IntoView {
    view! {
        <div class="space-y-6 max-w-3xl">
            <div>
                <label class="block text-sm font-medium text-theme-secondary mb-1">"Focus statement"</label>
                <textarea
                    class="w-full px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 h-24"
                    placeholder="One paragraph describing the topic this stream tracks"
                    prop:value=move || config.with(|c| c.semantic.focus.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        config.update(|c| c.semantic.focus = value);
                    }
                />
            </div>

            <div>
                <label class="block text-sm font-medium text-theme-secondary mb-1">"Seed terms"</label>
                <input
                    type="text"
                    class="w-full px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                    placeholder="solid-state batteries, anode materials, ..."
                    prop:value=move || config.with(|c| c.semantic.seed_terms.join(", "))
                    on:change=move |ev| {
                        let terms = parse_terms(&event_target_value(&ev));
                        config.update(|c| c.semantic.seed_terms = terms);
                    }
                />
                <p class="text-xs text-theme-muted mt-1">"Comma-separated. Anchors the embedding neighborhood."</p>
            </div>

            <div>
                <label class="block text-sm font-medium text-theme-secondary mb-1">"Excluded terms"</label>
                <input
                    type="text"
                    class="w-full px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                    placeholder="consumer electronics, stock tips, ..."
                    prop:value=move || config.with(|c| c.semantic.excluded_terms.join(", "))
                    on:change=move |ev| {
                        let terms = parse_terms(&event_target_value(&ev));
                        config.update(|c| c.semantic.excluded_terms = terms);
                    }
                />
            </div>

            <div>
                <div class="flex items-center justify-between mb-1">
                    <label class="text-sm font-medium text-theme-secondary">"Breadth"</label>
                    <span class="text-sm font-mono text-theme-muted">
                        {move || format!("{:.2}", config.with(|c| c.semantic.breadth))}
                    </span>
                </div>
                <input
                    type="range"
                    min="0"
                    max="1"
                    step="0.05"
                    class="w-full"
                    prop:value=move || config.with(|c| c.semantic.breadth.to_string())
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<f32>() {
                            config.update(|c| c.semantic.breadth = value);
                        }
                    }
                />
                <div class="flex justify-between text-xs text-theme-muted">
                    <span>"Narrow"</span>
                    <span>"Broad"</span>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms_trims_and_drops_empties() {
        assert_eq!(
            parse_terms(" a, b ,, c,"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(parse_terms("   ").is_empty());
    }
}
