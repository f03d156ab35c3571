//! Section extraction: an ordered chain of strategies over a payload.
//!
//! Each strategy looks at one place the backend has been known to put the
//! judge's feedback. The first one that yields content wins; the chain order is
//! [`DEFAULT_CHAIN`].

use crate::core::payload::FeedbackPayload;
use crate::text::{SectionPair, normalize, patterns, split_combined};

/// Aliases of the verbal section field.
pub const VERBAL_KEYS: &[&str] = &["verbalRfd", "verbal_rfd", "verbalRFD", "verbal"];
/// Aliases of the written section field.
pub const WRITTEN_KEYS: &[&str] = &["writtenRfd", "written_rfd", "writtenRFD"];
/// Plain `written` field; holds either the written section or a combined blob.
pub const PLAIN_WRITTEN_KEY: &str = "written";
/// Combined verbal + written blob.
pub const COMBINED_KEY: &str = "rfd";
/// Flow notes; used as the written section when given as plain text.
pub const FLOW_NOTES_KEYS: &[&str] = &["flowNotes", "flow_notes"];

/// One place to look for feedback sections.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    /// Sections found by this strategy; empty when it does not apply.
    fn extract(&self, payload: &FeedbackPayload) -> SectionPair;
}

/// Explicit verbal/written fields in the judge containers.
pub struct ExplicitFields;

/// `rfd` in the judge containers, split as a combined blob.
pub struct CombinedRfd;

/// Plain `written` field that carries a WRITTEN anchor, split as a combined blob.
pub struct AnchoredWritten;

/// Root-level `rfd`, split as a combined blob.
pub struct TopLevelRfd;

pub const DEFAULT_CHAIN: &[&dyn ExtractionStrategy] =
    &[&ExplicitFields, &CombinedRfd, &AnchoredWritten, &TopLevelRfd];

impl ExtractionStrategy for ExplicitFields {
    fn name(&self) -> &'static str {
        "explicit fields"
    }

    fn extract(&self, payload: &FeedbackPayload) -> SectionPair {
        let p = patterns();
        let verbal = normalize(&payload.judge_text(VERBAL_KEYS));
        let mut written = normalize(&payload.judge_text(WRITTEN_KEYS));
        if written.is_empty() {
            let plain = payload.judge_text(&[PLAIN_WRITTEN_KEY]);
            if !p.has_written_anchor(&plain) {
                written = normalize(&plain);
            }
        }
        // A verbal field that also carries the written section.
        if written.is_empty() && p.has_written_anchor(&verbal) {
            return split_combined(&verbal);
        }
        SectionPair::new(verbal, written)
    }
}

impl ExtractionStrategy for CombinedRfd {
    fn name(&self) -> &'static str {
        "combined rfd"
    }

    fn extract(&self, payload: &FeedbackPayload) -> SectionPair {
        split_combined(&payload.judge_text(&[COMBINED_KEY]))
    }
}

impl ExtractionStrategy for AnchoredWritten {
    fn name(&self) -> &'static str {
        "anchored written"
    }

    fn extract(&self, payload: &FeedbackPayload) -> SectionPair {
        let plain = payload.judge_text(&[PLAIN_WRITTEN_KEY]);
        if patterns().has_written_anchor(&plain) {
            split_combined(&plain)
        } else {
            SectionPair::default()
        }
    }
}

impl ExtractionStrategy for TopLevelRfd {
    fn name(&self) -> &'static str {
        "top-level rfd"
    }

    fn extract(&self, payload: &FeedbackPayload) -> SectionPair {
        split_combined(&payload.root_text(COMBINED_KEY))
    }
}

/// Extract both sections with [`DEFAULT_CHAIN`].
///
/// An empty result means the payload has no renderable feedback.
pub fn extract_sections(payload: &FeedbackPayload) -> SectionPair {
    extract_with(payload, DEFAULT_CHAIN)
}

/// Extract with a custom strategy chain, then apply the flow-notes fallback.
pub fn extract_with(payload: &FeedbackPayload, chain: &[&dyn ExtractionStrategy]) -> SectionPair {
    let mut sections = chain
        .iter()
        .find_map(|strategy| {
            let found = strategy.extract(payload);
            if found.is_empty() {
                None
            } else {
                log::debug!("Feedback sections found by {}", strategy.name());
                Some(found)
            }
        })
        .unwrap_or_default();

    if sections.written.is_empty()
        && let Some(notes) = flow_notes_text(payload)
    {
        log::debug!("Using plain-text flow notes as the written section");
        sections.written = notes;
    }

    if sections.is_empty() {
        log::debug!("No feedback sections in payload");
    }
    sections
}

/// Flow notes given as a plain string (not a structured list), verbatim.
fn flow_notes_text(payload: &FeedbackPayload) -> Option<String> {
    payload
        .judge_field(FLOW_NOTES_KEYS)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
