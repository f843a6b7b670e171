//! Report Detail Page
//!
//! Section-structured markdown viewer for one generated report.

use leptos::*;
use leptos_router::*;
use uuid::Uuid;

use crate::api::types::Report;
use crate::api::ApiClient;
use crate::chat::context::{use_chat_bridge, PageContext};
use crate::components::MarkdownBlock;

/// Report viewer
#[component]
pub fn ReportDetail() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let (report, set_report) = create_signal::<Option<Report>>(None);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    let bridge = use_chat_bridge();

    create_effect(move |_| {
        let report_id = id();
        if report_id.is_empty() {
            return;
        }
        spawn_local(async move {
            let client = ApiClient::new();
            match client
                .get::<Report>(&format!("/api/v1/reports/{}", report_id))
                .await
            {
                Ok(r) => set_report.set(Some(r)),
                Err(e) => {
                    gloo_console::error!("Failed to load report:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    // Tell the assistant which report is open
    {
        let bridge = bridge.clone();
        create_effect(move |_| {
            let mut context = PageContext::new("report_detail");
            if let Some(r) = report.get() {
                context = context.with_stream(r.stream_id).with_detail(serde_json::json!({
                    "report_id": r.id,
                    "title": r.title,
                }));
            } else if let Ok(report_id) = Uuid::parse_str(&id()) {
                context = context.with_detail(serde_json::json!({"report_id": report_id}));
            }
            bridge.context.set(context);
        });
    }

    view! {
        <div class="space-y-6 animate-in fade-in">
            <div class="flex items-center gap-4">
                <A href="/reports" class="p-2 hover:bg-theme-elevated rounded-lg transition-colors">
                    "← Back"
                </A>
                <h1 class="text-2xl font-bold text-theme-primary">
                    {move || {
                        report
                            .get()
                            .map(|r| r.title)
                            .filter(|t| !t.is_empty())
                            .unwrap_or_else(|| "Report".to_string())
                    }}
                </h1>
            </div>

            <Show when=move || loading.get()>
                <div class="py-12 text-center text-theme-muted">"Loading report..."</div>
            </Show>

            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <Show when=move || report.get().is_some()>
                {move || {
                    let r = report.get().unwrap_or_default();
                    let generated = r
                        .generated_at
                        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                        .unwrap_or_else(|| "pending".to_string());
                    view! {
                        <div class="space-y-6">
                            <div class="flex items-center gap-6 text-sm text-theme-muted">
                                <span>"Generated: " {generated}</span>
                                <a
                                    href={format!("/streams/{}/edit", r.stream_id)}
                                    class="text-blue-400 hover:text-blue-300"
                                >
                                    "Stream configuration"
                                </a>
                            </div>

                            {r.sections
                                .iter()
                                .map(|section| {
                                    view! {
                                        <section class="bg-theme-card border border-theme-default rounded-xl p-6">
                                            <div class="flex items-center justify-between mb-4">
                                                <h2 class="text-xl font-semibold text-theme-primary">
                                                    {section.title.clone()}
                                                </h2>
                                                <span class="text-xs text-theme-muted">
                                                    {format!("{} source(s)", section.source_count)}
                                                </span>
                                            </div>
                                            <MarkdownBlock content=section.body_markdown.clone() />
                                        </section>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                }}
            </Show>
        </div>
    }
}
