//! The stored "last result": the most recent analysis response, kept so it can
//! be rendered again without re-running the analysis.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::payload::FeedbackPayload;

/// On-disk envelope around a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResult {
    pub saved_at: DateTime<Utc>,
    pub payload: Value,
}

impl StoredResult {
    pub fn payload(&self) -> FeedbackPayload {
        FeedbackPayload::new(self.payload.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access stored result: {0}")]
    Io(#[from] io::Error),
    #[error("Stored result is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Save `payload` as the last result. Creates the parent directory if needed.
pub fn save(path: &Path, payload: &FeedbackPayload) -> Result<StoredResult, StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let stored = StoredResult {
        saved_at: Utc::now(),
        payload: payload.value().clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&stored)?)?;
    log::debug!("Stored analysis result at {}", path.display());
    Ok(stored)
}

/// Load the last result. Returns `Ok(None)` when nothing has been stored.
pub fn load(path: &Path) -> Result<Option<StoredResult>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Remove the last result. Returns whether a file was removed.
pub fn clear(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_load_clear() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("nested").join("last_result.json");
        let payload = FeedbackPayload::new(json!({ "judgeAnalysis": { "rfd": "x" } }));

        assert!(load(&path).unwrap().is_none());

        let saved = save(&path, &payload).unwrap();
        let loaded = load(&path).unwrap().expect("stored result");
        assert_eq!(loaded.payload(), payload);
        assert_eq!(loaded.saved_at, saved.saved_at);

        assert!(clear(&path).unwrap());
        assert!(!clear(&path).unwrap());
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("last_result.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Json(_))));
    }
}
