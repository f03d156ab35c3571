//! Build a payload from an analysis run directory.
//!
//! The debate analyzer leaves `judge_feedback.json` (structured, may carry an
//! error) and `judging_feedback.txt` (the raw model output) somewhere under its
//! run directory. The JSON is preferred; the text file is the fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use walkdir::WalkDir;

use crate::core::payload::{FeedbackPayload, first_text, text_of};
use crate::core::report::{coerce_flow_notes, score_at};

pub const JUDGE_FEEDBACK_JSON: &str = "judge_feedback.json";
pub const JUDGING_FEEDBACK_TXT: &str = "judging_feedback.txt";

/// Keys holding the judge's text in `judge_feedback.json`.
const FEEDBACK_KEYS: &[&str] = &["verbal_rfd", "rfd", "verbalRFD", "verbal", "feedback"];
const FLOW_KEYS: &[&str] = &["flow_notes", "flow"];

/// Run directories keep their outputs in `out/`; nothing deeper is searched.
const MAX_DEPTH: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum WorkDirError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("No judge feedback found under {}", .0.display())]
    NoFeedback(PathBuf),
    #[error("Judge failed: {message}{}", .hint.as_deref().map(|h| format!(" ({h})")).unwrap_or_default())]
    JudgeFailed {
        message: String,
        hint: Option<String>,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What `judge_feedback.json` turned out to hold.
#[derive(Debug)]
enum JudgeJson {
    Feedback(FeedbackPayload),
    Failed {
        message: String,
        hint: Option<String>,
    },
    Empty,
}

/// Load the judge's feedback from a run directory.
pub fn load_from_work_dir(dir: &Path) -> Result<FeedbackPayload, WorkDirError> {
    if !dir.is_dir() {
        return Err(WorkDirError::NotADirectory(dir.to_path_buf()));
    }

    let mut failure = None;
    if let Some(path) = find_file(dir, JUDGE_FEEDBACK_JSON) {
        match read_judge_json(&path) {
            Ok(JudgeJson::Feedback(payload)) => {
                log::info!("Loaded judge feedback from {}", path.display());
                return Ok(payload);
            }
            Ok(JudgeJson::Failed { message, hint }) => {
                log::warn!("{} reports a judge error: {}", path.display(), message);
                failure = Some(WorkDirError::JudgeFailed { message, hint });
            }
            Ok(JudgeJson::Empty) => {
                log::debug!("{} has no feedback text or flow", path.display());
            }
            Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
        }
    }

    if let Some(path) = find_file(dir, JUDGING_FEEDBACK_TXT) {
        let bytes = fs::read(&path).map_err(|source| WorkDirError::Io {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        if !text.trim().is_empty() {
            log::info!("Loaded raw judge output from {}", path.display());
            return Ok(payload_from_text(&text));
        }
    }

    Err(failure.unwrap_or_else(|| WorkDirError::NoFeedback(dir.to_path_buf())))
}

/// First file called `name` under `dir`; unreadable entries are skipped.
fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(MAX_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping entry while looking for {}: {}", name, e);
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == name)
        .map(|entry| entry.into_path())
}

fn read_judge_json(path: &Path) -> Result<JudgeJson, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&content)?;
    Ok(interpret_judge_json(&data))
}

fn interpret_judge_json(data: &Value) -> JudgeJson {
    let rfd = first_text(data, FEEDBACK_KEYS);
    let flow_notes = FLOW_KEYS
        .iter()
        .filter_map(|key| data.get(*key))
        .map(coerce_flow_notes)
        .find(|notes| !notes.is_empty())
        .unwrap_or_default();

    if rfd.trim().is_empty() && flow_notes.is_empty() {
        return match data.get("error").filter(|e| !e.is_null()) {
            Some(error) => JudgeJson::Failed {
                message: match error.get("message") {
                    Some(m) => text_of(m),
                    None => text_of(error),
                },
                hint: error
                    .get("hint")
                    .map(text_of)
                    .filter(|h| !h.trim().is_empty()),
            },
            None => JudgeJson::Empty,
        };
    }

    let mut judge = json!({ "rfd": rfd, "flowNotes": flow_notes });
    if let Some(score) = score_at(data, &["argument_score", "judge_score"])
        .or_else(|| data.get("scores").and_then(|s| score_at(s, &["argument"])))
    {
        judge["overallScore"] = json!(score);
    }

    let mut payload = json!({ "ok": true, "kind": "debate", "judgeAnalysis": judge });
    if let Some(score) = score_at(data, &["delivery_score"])
        .or_else(|| data.get("scores").and_then(|s| score_at(s, &["delivery"])))
    {
        payload["deliveryMetrics"] = json!({ "overallScore": score });
    }
    JudgeJson::Feedback(FeedbackPayload::new(payload))
}

/// The whole raw model output becomes the combined `rfd` blob.
fn payload_from_text(text: &str) -> FeedbackPayload {
    FeedbackPayload::new(json!({
        "ok": true,
        "kind": "debate",
        "judgeAnalysis": { "rfd": text, "flowNotes": [] }
    }))
}
