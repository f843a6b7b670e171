//! Card Components

use leptos::*;

/// Generic card component
#[component]
pub fn Card(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="bg-theme-card rounded-lg p-6 border border-theme-default">
            <h2 class="text-lg font-semibold mb-4 text-theme-primary">{title}</h2>
            <div>
                {children()}
            </div>
        </div>
    }
}

/// Stat card for displaying metrics
#[component]
pub fn StatCard<F>(
    title: &'static str,
    value: F,
    color: &'static str,
) -> impl IntoView
where
    F: Fn() -> String + 'static,
{
    let bg_color = match color {
        "blue" => "bg-blue-900/50",
        "green" => "bg-green-900/50",
        "purple" => "bg-purple-900/50",
        "yellow" => "bg-yellow-900/50",
        _ => "bg-theme-card",
    };

    let text_color = match color {
        "blue" => "text-blue-400",
        "green" => "text-green-400",
        "purple" => "text-purple-400",
        "yellow" => "text-yellow-400",
        _ => "text-theme-muted",
    };

    view! {
        <div class={format!("rounded-lg p-6 {}", bg_color)}>
            <p class="text-sm text-theme-secondary font-medium">{title}</p>
            <p class={format!("text-3xl font-bold mt-2 {}", text_color)}>
                {value}
            </p>
        </div>
    }
}
