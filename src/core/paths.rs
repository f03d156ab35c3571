//! Centralized path helpers for the data directory.

use std::path::PathBuf;

use crate::core::app;

/// File name of the stored analysis result inside the data directory.
pub const RESULTS_FILE_NAME: &str = "last_result.json";

/// Project directories from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Data directory (~/.local/share/rfd-render/).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().to_path_buf())
}

/// Default location of the stored analysis result.
pub fn default_results_file() -> Option<PathBuf> {
    data_dir().map(|d| d.join(RESULTS_FILE_NAME))
}
