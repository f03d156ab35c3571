//! HTML rendering of feedback sections: `<p>` and `<h3>` blocks only.

use super::blocks::{Block, segment_verbal, segment_written};

/// Rendered in place of a section with no content.
pub(crate) const NOT_PROVIDED_HTML: &str = "<p>Not provided.</p>";

/// Escape `&`, `<` and `>`. Strings without them are returned unchanged.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the written section with speech headings.
pub(crate) fn format_written_html(text: &str) -> String {
    render_blocks(&segment_written(text))
}

/// Render the verbal section as plain paragraphs.
pub(crate) fn format_verbal_html(text: &str) -> String {
    render_blocks(&segment_verbal(text))
}

/// Render blocks one per line, escaping their text. No blocks renders [`NOT_PROVIDED_HTML`].
pub(crate) fn render_blocks(blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return NOT_PROVIDED_HTML.to_string();
    }
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading(text) => format!("<h3>{}</h3>", escape_html(text)),
            Block::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
