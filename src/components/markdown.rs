//! Markdown Rendering Component

use leptos::*;
use pulldown_cmark::{html, Options, Parser};

/// Markdown block component
#[component]
pub fn MarkdownBlock(#[prop(into)] content: String) -> impl IntoView {
    let html = render_markdown(&content);

    view! {
        <div
            class="prose prose-invert prose-sm max-w-none"
            inner_html=html
        />
    }
}

/// Tailwind-compatible classes applied to the generated tags
const TAG_CLASSES: &[(&str, &str)] = &[
    ("<h1>", r#"<h1 class="text-2xl font-bold mt-6 mb-4">"#),
    ("<h2>", r#"<h2 class="text-xl font-semibold mt-5 mb-3">"#),
    ("<h3>", r#"<h3 class="text-lg font-medium mt-4 mb-2">"#),
    ("<p>", r#"<p class="my-3">"#),
    ("<ul>", r#"<ul class="list-disc list-inside my-3 space-y-1">"#),
    ("<ol>", r#"<ol class="list-decimal list-inside my-3 space-y-1">"#),
    ("<li>", r#"<li class="ml-4">"#),
    (
        "<blockquote>",
        r#"<blockquote class="border-l-4 border-theme-default pl-4 my-3 italic text-theme-secondary">"#,
    ),
    (
        "<code>",
        r#"<code class="px-1 py-0.5 bg-theme-elevated rounded text-sm font-mono">"#,
    ),
    (
        "<pre>",
        r#"<pre class="p-4 bg-theme-base rounded-lg overflow-x-auto my-3">"#,
    ),
    (
        "<table>",
        r#"<table class="min-w-full divide-y divide-theme-default my-3">"#,
    ),
    (
        "<th>",
        r#"<th class="px-4 py-2 text-left text-xs font-medium text-theme-muted uppercase">"#,
    ),
    ("<td>", r#"<td class="px-4 py-2 text-sm">"#),
    ("<a ", r#"<a class="text-blue-400 hover:underline" "#),
    ("<hr>", r#"<hr class="my-6 border-theme-default">"#),
];

/// Render markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    for (tag, replacement) in TAG_CLASSES {
        html_output = html_output.replace(tag, replacement);
    }
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_basics() {
        let html = render_markdown("# Title\n\nSome *emphasis* here.");
        assert!(html.contains(r#"<h1 class="text-2xl font-bold mt-6 mb-4">Title</h1>"#));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_render_markdown_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table"));
    }
}
