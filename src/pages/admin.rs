//! Admin Page
//!
//! Console over /api/v1/admin: user management, feature flags, and backend
//! component status.

use leptos::*;
use uuid::Uuid;

use crate::api::types::{AdminUser, ApiResponse, ComponentStatus, FeatureFlag};
use crate::api::ApiClient;
use crate::chat::context::{use_chat_bridge, PageContext};
use crate::components::{Card, ToggleSwitch};

/// Admin console
#[component]
pub fn Admin() -> impl IntoView {
    let (users, set_users) = create_signal::<Vec<AdminUser>>(Vec::new());
    let (flags, set_flags) = create_signal::<Vec<FeatureFlag>>(Vec::new());
    let (status, set_status) = create_signal::<Vec<ComponentStatus>>(Vec::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    let bridge = use_chat_bridge();
    bridge.context.set(PageContext::new("admin"));

    // Fetch everything on mount
    create_effect(move |_| {
        spawn_local(async move {
            let client = ApiClient::new();

            match client
                .get::<ApiResponse<Vec<AdminUser>>>("/api/v1/admin/users")
                .await
            {
                Ok(resp) => set_users.set(resp.data),
                Err(e) => {
                    gloo_console::error!("Failed to fetch users:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }

            match client
                .get::<ApiResponse<Vec<FeatureFlag>>>("/api/v1/admin/flags")
                .await
            {
                Ok(resp) => set_flags.set(resp.data),
                Err(e) => gloo_console::error!("Failed to fetch flags:", e.to_string()),
            }

            match client
                .get::<ApiResponse<Vec<ComponentStatus>>>("/api/v1/admin/status")
                .await
            {
                Ok(resp) => set_status.set(resp.data),
                Err(e) => gloo_console::error!("Failed to fetch status:", e.to_string()),
            }

            set_loading.set(false);
        });
    });

    // Persist one user row after a local edit
    let save_user = move |user: AdminUser| {
        spawn_local(async move {
            let client = ApiClient::new();
            let url = format!("/api/v1/admin/users/{}", user.id);
            match client.put::<serde_json::Value, _>(&url, &user).await {
                Ok(_) => gloo_console::log!("User updated:", user.email.clone()),
                Err(e) => {
                    gloo_console::error!("Failed to update user:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let update_user = move |id: Uuid, apply: fn(&mut AdminUser)| {
        let mut updated: Option<AdminUser> = None;
        set_users.update(|list| {
            if let Some(user) = list.iter_mut().find(|u| u.id == id) {
                apply(user);
                updated = Some(user.clone());
            }
        });
        if let Some(user) = updated {
            save_user(user);
        }
    };

    let toggle_flag = move |key: String, enabled: bool| {
        set_flags.update(|list| {
            if let Some(flag) = list.iter_mut().find(|f| f.key == key) {
                flag.enabled = enabled;
            }
        });
        spawn_local(async move {
            let client = ApiClient::new();
            let url = format!("/api/v1/admin/flags/{}", key);
            let body = serde_json::json!({ "enabled": enabled });
            match client.put::<serde_json::Value, _>(&url, &body).await {
                Ok(_) => gloo_console::log!("Flag updated:", key),
                Err(e) => {
                    gloo_console::error!("Failed to update flag:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <h1 class="text-3xl font-bold text-theme-primary">"Admin Console"</h1>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="text-center text-theme-muted py-8">"Loading..."</div>
            </Show>

            <Show when=move || !loading.get()>
                <div class="space-y-8">
                    // Users
                    <Card title="Users">
                        <table class="w-full">
                            <thead>
                                <tr class="text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    <th class="py-2">"Email"</th>
                                    <th class="py-2">"Role"</th>
                                    <th class="py-2">"Last Seen"</th>
                                    <th class="py-2 text-right">"Active"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-theme-default">
                                {move || {
                                    users
                                        .get()
                                        .into_iter()
                                        .map(|user| {
                                            let id = user.id;
                                            let last_seen = user
                                                .last_seen
                                                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                                .unwrap_or_else(|| "never".to_string());
                                            let role = user.role.clone();
                                            let active = user.active;
                                            view! {
                                                <tr class="text-sm">
                                                    <td class="py-3">{user.email.clone()}</td>
                                                    <td class="py-3">
                                                        <select
                                                            class="px-2 py-1 bg-theme-base border border-theme-default rounded focus:outline-none focus:border-blue-500 text-sm"
                                                            on:change=move |ev| {
                                                                let value = event_target_value(&ev);
                                                                let apply: fn(&mut AdminUser) = match value.as_str() {
                                                                    "admin" => |u| u.role = "admin".to_string(),
                                                                    "editor" => |u| u.role = "editor".to_string(),
                                                                    _ => |u| u.role = "viewer".to_string(),
                                                                };
                                                                update_user(id, apply);
                                                            }
                                                        >
                                                            <option value="viewer" selected={role == "viewer"}>"Viewer"</option>
                                                            <option value="editor" selected={role == "editor"}>"Editor"</option>
                                                            <option value="admin" selected={role == "admin"}>"Admin"</option>
                                                        </select>
                                                    </td>
                                                    <td class="py-3 text-theme-muted">{last_seen}</td>
                                                    <td class="py-3 text-right">
                                                        <ToggleSwitch
                                                            checked=move || active
                                                            on_change=move |v| {
                                                                let apply: fn(&mut AdminUser) = if v {
                                                                    |u| u.active = true
                                                                } else {
                                                                    |u| u.active = false
                                                                };
                                                                update_user(id, apply);
                                                            }
                                                        />
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </Card>

                    // Feature flags
                    <Card title="Feature Flags">
                        <div class="space-y-1">
                            {move || {
                                flags
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, flag)| {
                                        let enabled = flag.enabled;
                                        view! {
                                            <div class="flex items-center justify-between py-3 border-b border-theme-default last:border-0">
                                                <div>
                                                    <p class="font-medium text-theme-primary font-mono text-sm">{flag.key.clone()}</p>
                                                    <p class="text-sm text-theme-secondary">{flag.description.clone()}</p>
                                                </div>
                                                <ToggleSwitch
                                                    checked=move || enabled
                                                    on_change=move |v| {
                                                        let key = flags
                                                            .get_untracked()
                                                            .get(i)
                                                            .map(|f| f.key.clone());
                                                        if let Some(key) = key {
                                                            toggle_flag(key, v);
                                                        }
                                                    }
                                                />
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Card>

                    // Component status
                    <Card title="Backend Status">
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            {move || {
                                status
                                    .get()
                                    .into_iter()
                                    .map(|component| {
                                        let status_color = match component.status.as_str() {
                                            "healthy" => "bg-green-500",
                                            "degraded" => "bg-yellow-500",
                                            _ => "bg-red-500",
                                        };
                                        view! {
                                            <div class="p-4 bg-theme-elevated rounded-lg">
                                                <div class="flex items-center space-x-2">
                                                    <div class={format!("w-2 h-2 rounded-full {}", status_color)} />
                                                    <span class="font-medium text-sm">{component.component.clone()}</span>
                                                </div>
                                                <p class="text-xs text-theme-muted mt-2">{component.detail.clone()}</p>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Card>
                </div>
            </Show>
        </div>
    }
}
