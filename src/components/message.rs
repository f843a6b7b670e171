//! Message Bubble Component

use leptos::*;

use crate::chat::message::{ChatMessage, Role};
use crate::components::MarkdownBlock;

/// One transcript entry in the chat tray
#[component]
pub fn MessageBubble<S>(message: ChatMessage, on_suggest: S) -> impl IntoView
where
    S: Fn(String) + Clone + 'static,
{
    let is_user = message.role == Role::User;

    let bubble_class = if is_user {
        "bg-blue-900/50 ml-auto"
    } else {
        "bg-theme-elevated"
    };
    let align_class = if is_user { "justify-end" } else { "justify-start" };

    let content = message.content.clone();
    let cancelled = message.cancelled;
    let tool_history = message.tool_history.clone();
    let suggested_actions = message.suggested_actions.clone();

    view! {
        <div class={format!("flex {}", align_class)}>
            <div class={format!("max-w-[85%] rounded-lg p-3 {}", bubble_class)}>
                // Role indicator
                <div class="flex items-center space-x-2 mb-1">
                    <span class="text-xs font-medium text-theme-muted">
                        {if is_user { "You" } else { "Rill" }}
                    </span>
                    <Show when=move || cancelled>
                        <span class="text-[10px] px-1.5 py-0.5 rounded bg-yellow-900/60 text-yellow-300 uppercase tracking-wide">
                            "cancelled"
                        </span>
                    </Show>
                </div>

                // Main content
                <MarkdownBlock content=content />

                // Tool activity for this turn
                <Show when={
                    let tool_history = tool_history.clone();
                    move || !tool_history.is_empty()
                }>
                    <details class="mt-2 text-xs text-theme-muted">
                        <summary class="cursor-pointer select-none">
                            {format!("{} tool call(s)", tool_history.len())}
                        </summary>
                        <ul class="mt-1 space-y-1">
                            {tool_history.iter().map(|record| {
                                let notes = record.notes.join("; ");
                                view! {
                                    <li class="font-mono">
                                        {record.tool.clone()}
                                        <Show when={
                                            let notes = notes.clone();
                                            move || !notes.is_empty()
                                        }>
                                            <span class="text-theme-secondary">": " {notes.clone()}</span>
                                        </Show>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </details>
                </Show>

                // Follow-up suggestions
                <Show when={
                    let suggested_actions = suggested_actions.clone();
                    move || !suggested_actions.is_empty()
                }>
                    <div class="flex flex-wrap gap-2 mt-2">
                        {suggested_actions.iter().map(|action| {
                            let on_suggest = on_suggest.clone();
                            let send = action.action.clone();
                            view! {
                                <button
                                    class="px-2 py-1 text-xs bg-theme-card border border-theme-default rounded-full hover:border-blue-500 transition-colors"
                                    on:click=move |_| on_suggest(send.clone())
                                >
                                    {action.label.clone()}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                </Show>
            </div>
        </div>
    }
}
