//! Terminal preview of feedback sections, wrapped to a fixed width.

use super::blocks::{Block, segment_verbal, segment_written};

const NOT_PROVIDED_TEXT: &str = "Not provided.";

/// Plain-text rendering of the written section. Headings are upper-cased.
pub(crate) fn format_written_plain(text: &str, width: usize) -> String {
    render_plain(&segment_written(text), width)
}

/// Plain-text rendering of the verbal section.
pub(crate) fn format_verbal_plain(text: &str, width: usize) -> String {
    render_plain(&segment_verbal(text), width)
}

fn render_plain(blocks: &[Block], width: usize) -> String {
    if blocks.is_empty() {
        return NOT_PROVIDED_TEXT.to_string();
    }
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading(text) => text.to_uppercase(),
            Block::Paragraph(text) => textwrap::fill(text, width),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
