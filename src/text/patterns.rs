//! Anchor and heading patterns used to segment judge feedback.
//!
//! All patterns are compiled once and shared through [`patterns`].

use std::sync::OnceLock;

use regex::Regex;

/// "Written RFD", optionally followed by "and speech-by-speech flow analysis".
const WRITTEN_LABEL: &str =
    r"\bwritten\s+rfd(?:\s+and\s+speech[\s-]*by[\s-]*speech\s+flow\s+analysis)?";

/// "Verbal RFD".
const VERBAL_LABEL: &str = r"\bverbal\s+rfd";

/// Per-speech headings of a public forum round.
const SPEECH_HEADING: &str = r"(?:aff|neg)\s+(?:constructive|rebuttal|summary|final\s+focus)|crossfire\s+\d+|grand\s+crossfire";

/// Compiled patterns for the feedback pipeline.
pub(crate) struct Patterns {
    /// WRITTEN anchor with an optional trailing colon; searched anywhere.
    pub written_anchor: Regex,
    /// VERBAL anchor with an optional trailing colon; searched anywhere.
    pub verbal_anchor: Regex,
    /// VERBAL label at the very start of a text.
    pub verbal_prefix: Regex,
    /// A line holding nothing but a VERBAL label.
    pub verbal_label_line: Regex,
    /// A speech heading line: group 1 is the heading, group 2 any trailing text.
    pub heading: Regex,
    /// Horizontal whitespace before a line break.
    pub trailing_space: Regex,
    /// Three or more consecutive line breaks.
    pub blank_run: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Shared compiled patterns.
pub(crate) fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(Patterns::compile)
}

impl Patterns {
    fn compile() -> Self {
        Self {
            written_anchor: build(&format!(r"(?i){WRITTEN_LABEL}(?:[ \t]*:)?")),
            verbal_anchor: build(&format!(r"(?i){VERBAL_LABEL}(?:[ \t]*:)?")),
            verbal_prefix: build(&format!(r"(?i)^\s*{VERBAL_LABEL}(?:[ \t]*:)?")),
            verbal_label_line: build(&format!(r"(?i)^\s*{VERBAL_LABEL}\s*:?\s*$")),
            heading: build(&format!(r"(?i)^\s*({SPEECH_HEADING})\s*:\s*(.*)$")),
            trailing_space: build(r"[ \t]+\n"),
            blank_run: build(r"\n{3,}"),
        }
    }

    /// True if `s` contains a WRITTEN anchor anywhere.
    pub fn has_written_anchor(&self, s: &str) -> bool {
        self.written_anchor.is_match(s)
    }
}

// Only called with the literal patterns above.
fn build(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}
