//! Dashboard Page
//!
//! Workspace overview from /api/v1/overview plus the latest reports.

use leptos::*;

use crate::api::types::{ApiResponse, OverviewStats, ReportsPage};
use crate::api::ApiClient;
use crate::chat::context::{use_chat_bridge, PageContext};
use crate::components::{Card, StatCard};

/// Main dashboard page
#[component]
pub fn Dashboard() -> impl IntoView {
    let (stats, set_stats) = create_signal(OverviewStats::default());
    let (recent, set_recent) = create_signal(ReportsPage::default());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    let bridge = use_chat_bridge();
    bridge.context.set(PageContext::new("dashboard"));

    // Fetch overview data on mount
    create_effect(move |_| {
        spawn_local(async move {
            let client = ApiClient::new();

            match client.get::<ApiResponse<OverviewStats>>("/api/v1/overview").await {
                Ok(resp) => set_stats.set(resp.data),
                Err(e) => {
                    gloo_console::error!("Failed to fetch overview:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }

            match client
                .get::<ReportsPage>("/api/v1/reports?page=1&per_page=5")
                .await
            {
                Ok(page) => set_recent.set(page),
                Err(e) => gloo_console::error!("Failed to fetch recent reports:", e.to_string()),
            }

            set_loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-theme-primary">"Dashboard"</h1>
                <div class="text-sm text-theme-muted">
                    {move || if loading.get() { "Refreshing..." } else { "Up to date" }}
                </div>
            </div>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            // Stats grid
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                <StatCard
                    title="Research Streams"
                    value=move || stats.get().stream_count.to_string()
                    color="blue"
                />
                <StatCard
                    title="Reports This Week"
                    value=move || stats.get().reports_this_week.to_string()
                    color="green"
                />
                <StatCard
                    title="Conversations"
                    value=move || stats.get().conversation_count.to_string()
                    color="purple"
                />
                <StatCard
                    title="Generating Now"
                    value=move || stats.get().active_generations.to_string()
                    color="yellow"
                />
            </div>

            // Main content grid
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <Card title="Latest Reports">
                    <Show
                        when=move || !recent.get().reports.is_empty()
                        fallback=|| view! {
                            <p class="text-sm text-theme-muted py-4">"No reports generated yet."</p>
                        }
                    >
                        <ul class="divide-y divide-theme-default">
                            <For
                                each=move || recent.get().reports
                                key=|report| report.id
                                let:report
                            >
                                <li class="py-3 flex items-center justify-between">
                                    <div class="min-w-0">
                                        <a
                                            href={format!("/reports/{}", report.id)}
                                            class="text-sm font-medium text-theme-primary hover:text-blue-400 truncate block"
                                        >
                                            {report.title.clone()}
                                        </a>
                                        <p class="text-xs text-theme-muted">
                                            {report
                                                .generated_at
                                                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                                .unwrap_or_else(|| "pending".to_string())}
                                        </p>
                                    </div>
                                    <span class="text-xs font-medium text-theme-secondary">
                                        {format!("{} section(s)", report.section_count)}
                                    </span>
                                </li>
                            </For>
                        </ul>
                    </Show>
                </Card>

                <Card title="Quick Actions">
                    <div class="grid grid-cols-2 gap-4">
                        <ActionLink
                            title="New Stream"
                            description="Configure a research stream"
                            href="/streams"
                        />
                        <ActionLink
                            title="Browse Reports"
                            description="Read generated reports"
                            href="/reports"
                        />
                        <ActionLink
                            title="Admin Console"
                            description="Users and feature flags"
                            href="/admin"
                        />
                        <ActionLink
                            title="Settings"
                            description="Preferences and chat defaults"
                            href="/settings"
                        />
                    </div>
                </Card>
            </div>
        </div>
    }
}

/// Quick action link card
#[component]
fn ActionLink(
    title: &'static str,
    description: &'static str,
    href: &'static str,
) -> impl IntoView {
    view! {
        <a
            href=href
            class="block p-4 bg-theme-elevated rounded-lg hover:bg-theme-base transition-colors border border-theme-default hover:border-blue-500/50"
        >
            <h3 class="font-medium text-theme-primary">{title}</h3>
            <p class="text-xs text-theme-muted mt-1">{description}</p>
        </a>
    }
}
