//! Settings Page
//!
//! Local UI preferences (localStorage) and server chat defaults via
//! /api/v1/config.

use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use serde::{Deserialize, Serialize};

use crate::api::types::{ApiResponse, ChatDefaults};
use crate::api::ApiClient;
use crate::app::ThemeContext;
use crate::chat::context::{use_chat_bridge, PageContext};
use crate::components::ToggleSwitch;

/// Local UI preferences (stored in localStorage, not server)
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
struct UiPreferences {
    #[serde(default = "default_theme")]
    theme: String,
    #[serde(default = "default_tray_side")]
    tray_side: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_tray_side() -> String {
    "right".to_string()
}

const UI_PREFS_KEY: &str = "rill_ui_preferences";

/// Settings page
#[component]
pub fn Settings() -> impl IntoView {
    let (config, set_config) = create_signal(ChatDefaults::default());
    let (loading, set_loading) = create_signal(true);
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (success, set_success) = create_signal(false);

    // UI preferences (localStorage)
    let initial_prefs: UiPreferences = LocalStorage::get(UI_PREFS_KEY).unwrap_or_default();
    let (ui_prefs, set_ui_prefs) = create_signal(initial_prefs);

    // Get theme context from app
    let theme_ctx = use_context::<ThemeContext>();

    let bridge = use_chat_bridge();
    bridge.context.set(PageContext::new("settings"));

    // Save UI preferences to localStorage and update theme context
    let save_ui_prefs = move |prefs: UiPreferences| {
        let _ = LocalStorage::set("theme", &prefs.theme);
        let _ = LocalStorage::set("rill_tray_side", &prefs.tray_side);
        let _ = LocalStorage::set(UI_PREFS_KEY, &prefs);
        set_ui_prefs.set(prefs.clone());

        if let Some(ctx) = theme_ctx {
            let is_dark = prefs.theme != "light";
            ctx.set_dark.set(is_dark);
        }
    };

    // Fetch config on mount
    create_effect(move |_| {
        spawn_local(async move {
            let client = ApiClient::new();
            match client.get::<ApiResponse<ChatDefaults>>("/api/v1/config").await {
                Ok(resp) => set_config.set(resp.data),
                Err(e) => {
                    gloo_console::error!("Failed to fetch config:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    // Save handler
    let save_config = move |_| {
        let cfg = config.get_untracked();
        spawn_local(async move {
            set_saving.set(true);
            set_error.set(None);
            set_success.set(false);

            let client = ApiClient::new();
            match client.put::<ApiResponse<ChatDefaults>, _>("/api/v1/config", &cfg).await {
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
        <div class="space-y-8">
            // Header
            <h1 class="text-3xl font-bold text-theme-primary">"Settings"</h1>

            // Loading indicator
            <Show when=move || loading.get()>
                <div class="text-center text-theme-muted py-8">"Loading configuration..."</div>
            </Show>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            // Success message
            <Show when=move || success.get()>
                <div class="bg-theme-success/10 border border-theme-success rounded-lg p-4 text-theme-success">
                    "Settings saved."
                </div>
            </Show>

            <Show when=move || !loading.get()>
                <div class="space-y-6">
                    <SettingsSection title="Appearance">
                        <SettingItem label="Theme" description="Choose your preferred color scheme">
                            <select
                                class="px-3 py-2 bg-theme-card text-theme-primary border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                                prop:value=move || ui_prefs.get().theme.clone()
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    let mut prefs = ui_prefs.get();
                                    prefs.theme = value;
                                    save_ui_prefs(prefs);
                                }
                            >
                                <option value="dark">"Dark"</option>
                                <option value="light">"Light"</option>
                            </select>
                        </SettingItem>
                        <SettingItem label="Assistant tray" description="Which corner the chat tray docks to">
                            <select
                                class="px-3 py-2 bg-theme-card text-theme-primary border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                                prop:value=move || ui_prefs.get().tray_side.clone()
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    let mut prefs = ui_prefs.get();
                                    prefs.tray_side = value;
                                    save_ui_prefs(prefs);
                                }
                            >
                                <option value="right">"Bottom right"</option>
                                <option value="left">"Bottom left"</option>
                            </select>
                        </SettingItem>
                    </SettingsSection>

                    <SettingsSection title="Assistant Defaults">
                        <SettingItem label="Model" description="Model used for new conversations">
                            <input
                                type="text"
                                class="px-3 py-2 bg-theme-card text-theme-primary border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 w-48 placeholder-theme-muted"
                                placeholder="e.g. rill-chat-standard"
                                prop:value=move || config.get().model.clone()
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_config.update(|c| c.model = value);
                                }
                            />
                        </SettingItem>
                        <SettingItem label="Assistant name" description="Display name shown in the tray">
                            <input
                                type="text"
                                class="px-3 py-2 bg-theme-card text-theme-primary border border-theme-default rounded-lg focus:outline-none focus:border-blue-500 w-48"
                                prop:value=move || config.get().assistant_name.clone()
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    set_config.update(|c| c.assistant_name = value);
                                }
                            />
                        </SettingItem>
                        <SettingItem label="Context sharing" description="Send page context with chat requests">
                            <ToggleSwitch
                                checked=move || config.get().context_sharing_enabled
                                on_change=move |v| set_config.update(|c| c.context_sharing_enabled = v)
                            />
                        </SettingItem>
                    </SettingsSection>
                </div>

                // Save button
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

/// Settings section component
#[component]
fn SettingsSection(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="bg-theme-card rounded-lg p-6 border border-theme-default">
            <h2 class="text-xl font-semibold mb-4 text-theme-primary">{title}</h2>
            <div class="space-y-4">
                {children()}
            </div>
        </div>
    }
}

/// Individual setting item
#[component]
fn SettingItem(label: &'static str, description: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between py-3 border-b border-theme-default last:border-0">
            <div>
                <p class="font-medium text-theme-primary">{label}</p>
                <p class="text-sm text-theme-secondary">{description}</p>
            </div>
            <div>{children()}</div>
        </div>
    }
}
