//! Everything the results view shows for one analysis: sections, scores, flow notes.

use serde::Serialize;
use serde_json::Value;

use crate::core::extract::{FLOW_NOTES_KEYS, extract_sections};
use crate::core::payload::{FeedbackPayload, first_text, text_of};
use crate::text::{Block, SectionPair, format_verbal_html, format_written_html, render_blocks};

/// One per-speech annotation from the judge's flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNote {
    pub speech: String,
    pub time: String,
    pub notes: String,
}

impl FlowNote {
    fn is_empty(&self) -> bool {
        self.speech.is_empty() && self.time.is_empty() && self.notes.is_empty()
    }
}

/// Normalize the shapes flow notes come in: a list of objects
/// (`speech`/`label`, `time`/`timestamp`, `notes`/`text`) or of bare strings.
/// Objects with no usable field are dropped; anything but a list yields nothing.
pub fn coerce_flow_notes(raw: &Value) -> Vec<FlowNote> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(_) => {
                let note = FlowNote {
                    speech: first_text(item, &["speech", "label"]),
                    time: first_text(item, &["time", "timestamp"]),
                    notes: first_text(item, &["notes", "text"]),
                };
                (!note.is_empty()).then_some(note)
            }
            Value::String(s) => Some(FlowNote {
                speech: String::new(),
                time: String::new(),
                notes: s.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Render flow notes as `<h3>` speech labels and `<p>` notes.
pub fn render_flow_notes_html(notes: &[FlowNote]) -> String {
    let mut blocks = Vec::new();
    for note in notes {
        let heading = match (note.speech.trim(), note.time.trim()) {
            ("", "") => String::new(),
            (speech, "") => speech.to_string(),
            ("", time) => time.to_string(),
            (speech, time) => format!("{} ({})", speech, time),
        };
        if !heading.is_empty() {
            blocks.push(Block::Heading(heading));
        }
        let text = note.notes.trim();
        if !text.is_empty() {
            blocks.push(Block::Paragraph(text.to_string()));
        }
    }
    render_blocks(&blocks)
}

/// Argument and delivery scores, when the backend reported them as numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub argument: Option<i64>,
    pub delivery: Option<i64>,
}

impl Scores {
    pub fn from_payload(payload: &FeedbackPayload) -> Self {
        let root = payload.value();
        let argument = payload
            .judge_field(&["overallScore"])
            .and_then(score_of)
            .or_else(|| score_at(root, &["argument_score", "judge_score"]))
            .or_else(|| root.get("scores").and_then(|s| score_at(s, &["argument"])));
        let delivery = root
            .get("deliveryMetrics")
            .and_then(|d| score_at(d, &["overallScore"]))
            .or_else(|| score_at(root, &["delivery_score"]))
            .or_else(|| root.get("scores").and_then(|s| score_at(s, &["delivery"])));
        Self { argument, delivery }
    }
}

/// First numeric score among `keys` of `object`.
pub(crate) fn score_at(object: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(score_of)
}

/// Numbers only; fractional scores are truncated.
fn score_of(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
}

/// Outcome reported by the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum AnalysisStatus {
    Ok,
    /// `ok: false`, with the backend's `error` message.
    Failed(String),
}

impl AnalysisStatus {
    pub fn from_payload(payload: &FeedbackPayload) -> Self {
        let root = payload.value();
        match root.get("ok").and_then(Value::as_bool) {
            Some(false) => {
                let message = root.get("error").map(text_of).unwrap_or_default();
                if message.trim().is_empty() {
                    AnalysisStatus::Failed("analysis failed".to_string())
                } else {
                    AnalysisStatus::Failed(message)
                }
            }
            _ => AnalysisStatus::Ok,
        }
    }
}

/// Display-ready view of a payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub sections: SectionPair,
    pub verbal_html: String,
    pub written_html: String,
    pub flow_notes: Vec<FlowNote>,
    pub scores: Scores,
    pub status: AnalysisStatus,
}

impl FeedbackReport {
    pub fn build(payload: &FeedbackPayload) -> Self {
        let sections = extract_sections(payload);
        let verbal_html = format_verbal_html(&sections.verbal);
        let written_html = format_written_html(&sections.written);
        let flow_notes = payload
            .judge_field(FLOW_NOTES_KEYS)
            .map(coerce_flow_notes)
            .unwrap_or_default();
        Self {
            sections,
            verbal_html,
            written_html,
            flow_notes,
            scores: Scores::from_payload(payload),
            status: AnalysisStatus::from_payload(payload),
        }
    }

    /// False when neither section has content.
    pub fn has_feedback(&self) -> bool {
        !self.sections.is_empty()
    }
}
