//! Section segmentation into headings and paragraphs.
//!
//! Formatters render these blocks; segmentation itself never escapes or wraps.

use super::normalize::normalize;
use super::patterns::patterns;

/// One display block of a feedback section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    Heading(String),
    Paragraph(String),
}

/// Segment the written section.
///
/// Recognized speech headings become [`Block::Heading`] (colon dropped); text after
/// the colon on the same line opens the next paragraph. Any line containing the
/// WRITTEN anchor is dropped, as is a bare "Verbal RFD:" line. Blank lines,
/// headings and dropped lines end the current paragraph, whose lines are joined
/// with single spaces.
pub(crate) fn segment_written(text: &str) -> Vec<Block> {
    let p = patterns();
    let normalized = normalize(text);
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in normalized.lines() {
        let line = line.trim();
        if line.is_empty()
            || p.written_anchor.is_match(line)
            || p.verbal_label_line.is_match(line)
        {
            flush_paragraph(&mut buffer, &mut blocks);
            continue;
        }
        if let Some(caps) = p.heading.captures(line) {
            flush_paragraph(&mut buffer, &mut blocks);
            blocks.push(Block::Heading(collapse_whitespace(&caps[1])));
            if let Some(rest) = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
            {
                buffer.push(rest);
            }
            continue;
        }
        buffer.push(line);
    }
    flush_paragraph(&mut buffer, &mut blocks);
    blocks
}

/// Segment the verbal section: paragraphs split on blank lines, no headings.
/// Single line breaks inside a paragraph are kept.
pub(crate) fn segment_verbal(text: &str) -> Vec<Block> {
    let p = patterns();
    let cleaned = text.replace('\r', "");
    let collapsed = p.blank_run.replace_all(&cleaned, "\n\n");
    collapsed
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Block::Paragraph(s.to_string()))
        .collect()
}

fn flush_paragraph(buffer: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if buffer.is_empty() {
        return;
    }
    let paragraph = collapse_whitespace(&buffer.join(" "));
    buffer.clear();
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph));
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
