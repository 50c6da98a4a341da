//! Markdown rendering for release notes.
//!
//! Release bodies arrive as GitHub-flavored markdown and are embedded into
//! the feed as HTML. Raw HTML found in the notes is downgraded to text so
//! that the serializer escapes it; a release body can therefore never smuggle
//! markup or scripts into the feed.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render GitHub-flavored markdown to HTML for use as a feed description.
///
/// Supports fenced code blocks, tables, strikethrough, and task lists. The
/// result is wrapped in a `pre-wrap` styled `div` so that readers preserve
/// the line structure of the original notes. An empty body renders to an
/// empty string, not an empty wrapper.
pub fn to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut body = String::new();
    html::push_html(&mut body, events);

    format!(
        "<div style=\"white-space: pre-wrap; font-family: sans-serif\">{}</div>",
        body.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_renders_empty() {
        assert_eq!(to_html(""), "");
    }

    #[test]
    fn test_emphasis() {
        let html = to_html("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_output_is_wrapped() {
        let html = to_html("hello");
        assert!(html.starts_with("<div style=\"white-space: pre-wrap; font-family: sans-serif\">"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_fenced_code_block() {
        let html = to_html("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_table() {
        let html = to_html("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = to_html("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_raw_block_html_is_escaped() {
        let html = to_html("<div onclick=\"evil()\">x</div>\n\ntext");
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;div onclick"));
    }
}
