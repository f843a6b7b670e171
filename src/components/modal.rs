//! Modal Component

use leptos::*;

/// Centered modal with backdrop-click and button close
#[component]
pub fn Modal<F>(#[prop(into)] title: String, on_close: F, children: Children) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/60 backdrop-blur-sm animate-in fade-in duration-200"
            on:click=move |_| on_close()
        >
            <div
                class="bg-theme-card border border-theme-default rounded-2xl shadow-2xl w-full max-w-2xl max-h-[90vh] overflow-y-auto"
                on:click=move |ev| ev.stop_propagation()
            >
                <div class="p-6 space-y-6">
                    <div class="flex justify-between items-start">
                        <h2 class="text-2xl font-bold text-theme-primary">{title}</h2>
                        <button
                            class="text-theme-muted hover:text-theme-primary p-2"
                            on:click=move |_| on_close()
                        >
                            "✕"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </div>
    }
}
