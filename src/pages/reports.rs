//! Reports Page
//!
//! Browses generated reports from /api/v1/reports with status filter,
//! pagination, and CSV export.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api::types::{ReportsPage, ReportSummary};
use crate::api::ApiClient;
use crate::chat::context::{use_chat_bridge, PageContext};

/// Reports browser
#[component]
pub fn Reports() -> impl IntoView {
    let (reports, set_reports) = create_signal::<Vec<ReportSummary>>(Vec::new());
    let (total, set_total) = create_signal(0usize);
    let (page, set_page) = create_signal(1usize);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (filter_status, set_filter_status) = create_signal::<Option<String>>(None);

    let per_page = 10;

    let bridge = use_chat_bridge();
    bridge.context.set(PageContext::new("reports"));

    // Fetch reports
    let fetch_reports = move || {
        let current_page = page.get();
        let status_filter = filter_status.get();

        spawn_local(async move {
            set_loading.set(true);
            let client = ApiClient::new();

            let mut url = format!("/api/v1/reports?page={}&per_page={}", current_page, per_page);
            if let Some(status) = status_filter {
                if !status.is_empty() {
                    url.push_str(&format!("&status={}", status));
                }
            }

            match client.get::<ReportsPage>(&url).await {
                Ok(resp) => {
                    set_reports.set(resp.reports);
                    set_total.set(resp.total);
                    set_error.set(None);
                }
                Err(e) => {
                    gloo_console::error!("Failed to fetch reports:", e.to_string());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // Initial fetch
    create_effect(move |_| {
        fetch_reports();
    });

    // Refetch when page or filter changes
    create_effect(move |prev: Option<(usize, Option<String>)>| {
        let current = (page.get(), filter_status.get());
        if prev.is_some() && prev != Some(current.clone()) {
            fetch_reports();
        }
        current
    });

    let total_pages = move || (total.get() + per_page - 1) / per_page;

    let export_csv = move |_| {
        let data = reports.get();
        if data.is_empty() {
            gloo_console::warn!("No reports to export");
            return;
        }

        let header = "ID,Stream,Title,Status,Sections,Generated At";
        let rows: Vec<String> = data
            .iter()
            .map(|r| {
                format!(
                    "{},{},{},{},{},{}",
                    r.id,
                    r.stream_id,
                    r.title.replace(',', ";"),
                    r.status,
                    r.section_count,
                    r.generated_at.map(|t| t.to_rfc3339()).unwrap_or_default()
                )
            })
            .collect();
        let csv_content = format!("{}\n{}", header, rows.join("\n"));

        // Create Blob and download
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                let array = js_sys::Array::new();
                array.push(&wasm_bindgen::JsValue::from_str(&csv_content));

                let opts = web_sys::BlobPropertyBag::new();
                opts.set_type("text/csv;charset=utf-8");

                if let Ok(blob) =
                    web_sys::Blob::new_with_str_sequence_and_options(&array, &opts)
                {
                    if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                        if let Ok(a) = document.create_element("a") {
                            let _ = a.set_attribute("href", &url);
                            let _ = a.set_attribute("download", "reports.csv");
                            if let Some(anchor) = a.dyn_ref::<web_sys::HtmlAnchorElement>() {
                                anchor.click();
                            }
                            let _ = web_sys::Url::revoke_object_url(&url);
                            gloo_console::log!("Exported", data.len(), "reports");
                        }
                    }
                }
            }
        }
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-theme-primary">"Reports"</h1>
                <div class="flex items-center space-x-4">
                    <select
                        class="px-3 py-2 bg-theme-card border border-theme-default rounded-lg focus:outline-none focus:border-blue-500"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_filter_status.set(if value.is_empty() { None } else { Some(value) });
                            set_page.set(1);
                        }
                    >
                        <option value="">"All Status"</option>
                        <option value="completed">"Completed"</option>
                        <option value="generating">"Generating"</option>
                        <option value="failed">"Failed"</option>
                    </select>
                    <button
                        class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700"
                        on:click=export_csv
                    >
                        "Export"
                    </button>
                </div>
            </div>

            // Error display
            <Show when=move || error.get().is_some()>
                <div class="bg-theme-error/10 border border-theme-error rounded-lg p-4 text-theme-error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            // Loading indicator
            <Show when=move || loading.get()>
                <div class="text-center text-theme-muted py-8">"Loading..."</div>
            </Show>

            // Reports table
            <Show when=move || !loading.get()>
                <div class="bg-theme-card rounded-lg overflow-hidden border border-theme-default">
                    <table class="w-full">
                        <thead class="bg-theme-elevated">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    "Title"
                                </th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    "Status"
                                </th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    "Sections"
                                </th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    "Generated"
                                </th>
                                <th class="px-6 py-3 text-right text-xs font-medium text-theme-muted uppercase tracking-wider">
                                    "Actions"
                                </th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-theme-default">
                            <Show
                                when=move || !reports.get().is_empty()
                                fallback=|| view! {
                                    <tr>
                                        <td colspan="5" class="px-6 py-8 text-center text-theme-muted">
                                            "No reports found"
                                        </td>
                                    </tr>
                                }
                            >
                                <For
                                    each=move || reports.get()
                                    key=|report| report.id
                                    let:report
                                >
                                    <ReportRow report=report.clone() />
                                </For>
                            </Show>
                        </tbody>
                    </table>
                </div>
            </Show>

            // Pagination
            <div class="flex items-center justify-between">
                <p class="text-sm text-theme-muted">
                    {move || {
                        let start = (page.get() - 1) * per_page + 1;
                        let end = std::cmp::min(page.get() * per_page, total.get());
                        format!("Showing {}-{} of {} reports", start.min(end), end, total.get())
                    }}
                </p>
                <div class="flex space-x-2">
                    <button
                        class="px-3 py-1 bg-theme-elevated rounded hover:bg-theme-base disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || page.get() <= 1
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Previous"
                    </button>
                    <span class="px-3 py-1 text-theme-muted">
                        {move || format!("{} / {}", page.get(), total_pages().max(1))}
                    </span>
                    <button
                        class="px-3 py-1 bg-theme-elevated rounded hover:bg-theme-base disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || page.get() >= total_pages()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Report table row
#[component]
fn ReportRow(report: ReportSummary) -> impl IntoView {
    let status_class = match report.status.as_str() {
        "completed" => "bg-green-900 text-green-300",
        "failed" => "bg-red-900 text-red-300",
        "generating" => "bg-yellow-900 text-yellow-300",
        _ => "bg-theme-elevated text-theme-secondary",
    };

    let time_display = report
        .generated_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string());

    view! {
        <tr class="hover:bg-theme-elevated transition-colors">
            <td class="px-6 py-4">
                <div class="max-w-md truncate text-sm">{report.title.clone()}</div>
            </td>
            <td class="px-6 py-4">
                <span class={format!("px-2 py-1 text-xs font-medium rounded {}", status_class)}>
                    {report.status.clone()}
                </span>
            </td>
            <td class="px-6 py-4 text-sm text-theme-muted">
                {report.section_count}
            </td>
            <td class="px-6 py-4 text-sm text-theme-muted">
                {time_display}
            </td>
            <td class="px-6 py-4 text-right">
                <a
                    href={format!("/reports/{}", report.id)}
                    class="text-blue-400 hover:text-blue-300 text-sm"
                >
                    "Read"
                </a>
            </td>
        </tr>
    }
}
