//! Combined-blob splitting: one text holding both the verbal and the written RFD.

use serde::Serialize;

use super::normalize::normalize;
use super::patterns::patterns;

/// The two feedback sections. An empty string means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionPair {
    pub verbal: String,
    pub written: String,
}

impl SectionPair {
    pub fn new(verbal: impl Into<String>, written: impl Into<String>) -> Self {
        Self {
            verbal: verbal.into(),
            written: written.into(),
        }
    }

    /// True when neither section has content (nothing to render).
    pub fn is_empty(&self) -> bool {
        self.verbal.is_empty() && self.written.is_empty()
    }
}

/// Split a blob that may contain both sections.
///
/// The WRITTEN anchor wins over the VERBAL anchor: text before it is the verbal
/// section (minus a leading "Verbal RFD:" label), text after it is the written
/// section. A blob with only a VERBAL anchor is all verbal; a blob with neither
/// is all written.
pub(crate) fn split_combined(blob: &str) -> SectionPair {
    let p = patterns();
    let text = normalize(blob);

    if let Some(anchor) = p.written_anchor.find(&text) {
        let before = &text[..anchor.start()];
        let verbal = p.verbal_prefix.replace(before, "");
        return SectionPair::new(verbal.trim(), text[anchor.end()..].trim());
    }

    if p.verbal_anchor.is_match(&text) {
        let verbal = p.verbal_anchor.replace(&text, "");
        return SectionPair::new(verbal.trim(), "");
    }

    SectionPair::new("", text)
}
