//! Whitespace and markup cleanup applied wherever raw feedback text enters the pipeline.

use super::patterns::patterns;

/// Normalize raw feedback text.
///
/// Removes carriage returns and `**` bold markers, strips horizontal whitespace
/// before line breaks, collapses runs of three or more newlines to a single blank
/// line, and trims the result. Applying it twice yields the same string.
pub(crate) fn normalize(text: &str) -> String {
    let p = patterns();
    let cleaned = text.replace('\r', "").replace("**", "");
    let cleaned = p.trailing_space.replace_all(&cleaned, "\n");
    let cleaned = p.blank_run.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}
