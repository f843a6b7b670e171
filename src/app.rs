//! Main Application Component

use gloo_storage::Storage;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::chat::context::ChatBridge;
use crate::components::ChatTray;
use crate::pages::{Admin, Dashboard, ReportDetail, Reports, Settings, StreamEditor, Streams};

/// Theme provider context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub is_dark: ReadSignal<bool>,
    pub set_dark: WriteSignal<bool>,
}

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize theme from localStorage
    let stored_theme =
        gloo_storage::LocalStorage::get::<String>("theme").unwrap_or_else(|_| "dark".to_string());
    let initial_dark = stored_theme != "light";

    let (is_dark, set_dark) = create_signal(initial_dark);
    provide_context(ThemeContext { is_dark, set_dark });

    // Shared state between pages and the assistant tray
    provide_context(ChatBridge::new());

    // Apply theme class to html element
    create_effect(move |_| {
        let dark = is_dark.get();
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(html) = document.document_element() {
                    let class_list = html.class_list();
                    if dark {
                        let _ = class_list.add_1("dark");
                    } else {
                        let _ = class_list.remove_1("dark");
                    }
                }
            }
        }
    });

    view! {
        <Title text="Rill Console" />
        <Meta name="description" content="Rill research-stream authoring console" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />

        <Router>
            <main class="h-screen flex flex-col bg-theme-base text-theme-primary overflow-hidden">
                <NavBar />
                <div class="flex-1 container mx-auto px-4 py-8 overflow-y-auto flex flex-col">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/streams" view=Streams />
                        <Route path="/streams/:id/edit" view=StreamEditor />
                        <Route path="/reports" view=Reports />
                        <Route path="/reports/:id" view=ReportDetail />
                        <Route path="/admin" view=Admin />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </div>
                <ChatTray />
            </main>
        </Router>
    }
}

/// Navigation bar component
#[component]
fn NavBar() -> impl IntoView {
    view! {
        <nav class="bg-theme-card border-b border-theme-default shadow-sm">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-8">
                        <A href="/" class="text-xl font-bold text-theme-primary">
                            "Rill"
                        </A>
                        <div class="flex space-x-4">
                            <NavLink href="/" text="Dashboard" />
                            <NavLink href="/streams" text="Streams" />
                            <NavLink href="/reports" text="Reports" />
                            <NavLink href="/admin" text="Admin" />
                            <NavLink href="/settings" text="Settings" />
                        </div>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Navigation link component
#[component]
fn NavLink(href: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-3 py-2 rounded-md text-sm font-medium text-theme-secondary hover:text-theme-primary hover:bg-theme-elevated transition-colors"
        >
            {text}
        </A>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center py-20">
            <h1 class="text-6xl font-bold text-theme-muted">"404"</h1>
            <p class="text-xl text-theme-secondary mt-4">"Page not found"</p>
            <A href="/" class="inline-block mt-8 px-6 py-3 bg-blue-600 text-white rounded-lg hover:opacity-90">
                "Go Home"
            </A>
        </div>
    }
}
