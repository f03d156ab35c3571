//! Analysis payloads: JSON of whatever shape the backend returned.
//!
//! Nothing about the structure is guaranteed. Lookups on missing keys or on
//! non-object values return nothing instead of failing.

use serde_json::Value;

/// Nested objects holding the judge's output, in lookup order.
pub const JUDGE_CONTAINERS: [&str; 2] = ["judgeAnalysis", "judge_analysis"];

/// Error reading or parsing a payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Failed to read payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// An analysis response of unknown shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackPayload {
    value: Value,
}

impl FeedbackPayload {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parse a payload. Any valid JSON is accepted, including non-objects.
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Judge containers present in the payload, in lookup order.
    pub fn judge_containers(&self) -> impl Iterator<Item = &Value> {
        JUDGE_CONTAINERS
            .iter()
            .filter_map(|key| self.value.get(*key))
            .filter(|v| v.is_object())
    }

    /// First value among `keys` in the judge containers that has text.
    /// Keys are tried in order; each key is looked up in every container before the next key.
    pub fn judge_text(&self, keys: &[&str]) -> String {
        keys.iter()
            .flat_map(|key| self.judge_containers().filter_map(move |c| c.get(*key)))
            .map(text_of)
            .find(|s| !s.trim().is_empty())
            .unwrap_or_default()
    }

    /// First non-null value among `keys` in the judge containers.
    pub fn judge_field(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .flat_map(|key| self.judge_containers().filter_map(move |c| c.get(*key)))
            .find(|v| !v.is_null())
    }

    /// Text of a root-level field.
    pub fn root_text(&self, key: &str) -> String {
        self.value.get(key).map(text_of).unwrap_or_default()
    }
}

/// Coerce a JSON value to text: strings verbatim, numbers stringified, anything else empty.
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// First value among `keys` of `object` that has text.
pub fn first_text(object: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .map(text_of)
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}
