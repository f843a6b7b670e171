//! Toggle Switch Component

use leptos::*;

/// Toggle switch with callback
#[component]
pub fn ToggleSwitch<F>(checked: F, on_change: impl Fn(bool) + Copy + 'static) -> impl IntoView
where
    F: Fn() -> bool + Copy + 'static,
{
    view! {
        <button
            type="button"
            role="switch"
            aria-checked=move || if checked() { "true" } else { "false" }
            class="relative inline-flex h-6 w-11 flex-shrink-0 cursor-pointer rounded-full border-2 border-transparent transition-colors duration-200 ease-in-out focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-offset-2"
            class:bg-theme-success=checked
            class:bg-theme-elevated=move || !checked()
            on:click=move |_| on_change(!checked())
        >
            <span
                class="pointer-events-none inline-block h-5 w-5 transform rounded-full bg-white shadow ring-0 transition duration-200 ease-in-out"
                class:translate-x-5=checked
                class:translate-x-0=move || !checked()
            />
        </button>
    }
}
