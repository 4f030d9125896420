//! Server-rendered search page
//!
//! The same search form appears twice: inline under the title and in the
//! sidebar. Both submit `GET /?q=...`.

use docsearch_vector::{SearchResult, SearchStats};
use std::fmt::Write;

const TITLE: &str = "Information Retrieval System";
const SUBTITLE: &str = "Search Reuters News Articles Using Word Embeddings";

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; display: flex; color: #262730; }
aside { width: 260px; min-height: 100vh; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
aside h2 { font-size: 1rem; margin-top: 0; }
aside input[type=text] { width: 100%; box-sizing: border-box; margin-bottom: .5rem; }
main { flex: 1; max-width: 760px; padding: 2rem 3rem; }
form.inline { display: flex; gap: .5rem; margin: 1rem 0 1.5rem; }
form.inline input[type=text] { flex: 1; padding: .5rem; }
button { padding: .5rem 1rem; border: 1px solid #d0d3da; border-radius: .4rem; background: #fff; cursor: pointer; }
aside button { width: 100%; background: #ff4b4b; color: #fff; border: none; }
.warning { padding: .75rem 1rem; background: #fffce7; border-left: 4px solid #f5c000; }
.error { padding: .75rem 1rem; background: #ffecec; border-left: 4px solid #ff4b4b; }
.meta { color: #6b6f7b; margin: .25rem 0; }
.card { padding: .5rem 0; }
.card p { margin: .25rem 0 0; line-height: 1.4; }
"#;

/// What the page shows below the forms
#[derive(Debug)]
pub enum PageView<'a> {
    /// No search submitted yet
    Empty,

    /// Search rejected before ranking
    Warning { query: &'a str, message: &'a str },

    /// Search failed while ranking
    Error { query: &'a str, message: String },

    /// Ranked results
    Results {
        query: &'a str,
        stats: &'a SearchStats,
        results: &'a [SearchResult],
        preview_chars: usize,
    },
}

impl PageView<'_> {
    fn query(&self) -> &str {
        match self {
            PageView::Empty => "",
            PageView::Warning { query, .. }
            | PageView::Error { query, .. }
            | PageView::Results { query, .. } => query,
        }
    }
}

/// Render the full HTML document
pub fn render_page(view: &PageView<'_>) -> String {
    let query = escape_html(view.query());
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>Search</h2>
<form method="get" action="/" class="sidebar">
<input type="text" name="q" value="{query}" placeholder="Enter your search query">
<button type="submit">Search</button>
</form>
</aside>
<main>
<h1>🔍 {TITLE}</h1>
<h3>{SUBTITLE}</h3>
<form method="get" action="/" class="inline">
<input type="text" name="q" value="{query}" placeholder="Enter your search query:" aria-label="Enter your search query">
<button type="submit">Search</button>
</form>
"#
    );

    match view {
        PageView::Empty => {}
        PageView::Warning { message, .. } => {
            let _ = writeln!(html, r#"<div class="warning">{}</div>"#, escape_html(message));
        }
        PageView::Error { message, .. } => {
            let _ = writeln!(html, r#"<div class="error">{}</div>"#, escape_html(message));
        }
        PageView::Results {
            stats,
            results,
            preview_chars,
            ..
        } => render_results(&mut html, stats, results, *preview_chars),
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_results(
    html: &mut String,
    stats: &SearchStats,
    results: &[SearchResult],
    preview_chars: usize,
) {
    let (rows, dim) = stats.embedding_shape;
    let _ = writeln!(html, r#"<p class="meta">Documents loaded: {}</p>"#, stats.documents);
    let _ = writeln!(html, r#"<p class="meta">Embeddings shape: ({}, {})</p>"#, rows, dim);
    let _ = writeln!(html, "<h3>🏆 Top {} Relevant Documents:</h3>", results.len());

    for result in results {
        let _ = writeln!(
            html,
            r#"<div class="card"><div>📄 <strong>{}</strong> (Score: {:.4})</div><p>📝 {}</p></div>
<hr>"#,
            escape_html(&result.doc_id),
            result.score,
            escape_html(&result.preview(preview_chars)),
        );
    }
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stats() -> SearchStats {
        SearchStats {
            documents: 2,
            embedding_shape: (2, 4),
            encoder: "random-baseline".to_string(),
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"AT&T's"</b>"#),
            "&lt;b&gt;&quot;AT&amp;T&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_empty_page_has_both_forms() {
        let html = render_page(&PageView::Empty);
        assert_eq!(html.matches(r#"name="q""#).count(), 2);
        assert!(html.contains(r#"class="sidebar""#));
        assert!(html.contains(r#"class="inline""#));
        assert!(!html.contains("Documents loaded"));
    }

    #[test]
    fn test_warning_page() {
        let html = render_page(&PageView::Warning {
            query: "  ",
            message: "Please enter a valid query!",
        });
        assert!(html.contains(r#"<div class="warning">Please enter a valid query!</div>"#));
        assert!(!html.contains("Relevant Documents"));
    }

    #[test]
    fn test_results_page_formats_cards() {
        let results = vec![
            SearchResult::new("doc1".into(), 1.0, "The cat sat.".into()),
            SearchResult::new("doc<2>".into(), 0.123456, "x".repeat(600)),
        ];
        let stats = stats();
        let html = render_page(&PageView::Results {
            query: "cats & dogs",
            stats: &stats,
            results: &results,
            preview_chars: 500,
        });

        assert!(html.contains(r#"value="cats &amp; dogs""#));
        assert!(html.contains("Documents loaded: 2"));
        assert!(html.contains("Embeddings shape: (2, 4)"));
        assert!(html.contains("Top 2 Relevant Documents"));
        assert!(html.contains("<strong>doc1</strong> (Score: 1.0000)"));
        assert!(html.contains("<strong>doc&lt;2&gt;</strong> (Score: 0.1235)"));
        assert!(html.contains("The cat sat...."));
        assert!(html.contains(&format!("{}...", "x".repeat(500))));
        assert!(!html.contains(&"x".repeat(501)));
    }
}
