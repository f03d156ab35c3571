//! Runtime configuration from the environment (and `.env`, loaded in main).

use std::env;
use std::path::PathBuf;

use crate::core::paths;

/// Overrides the stored result location.
pub const RESULTS_FILE_VAR: &str = "RFD_RENDER_RESULTS_FILE";
/// Wrap width for plain-text output.
pub const WRAP_WIDTH_VAR: &str = "RFD_RENDER_WRAP_WIDTH";

pub const DEFAULT_WRAP_WIDTH: usize = 80;
pub const MIN_WRAP_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where `store` writes and `render` (without input) reads the last analysis result.
    pub results_file: PathBuf,
    pub wrap_width: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No data directory available; set RFD_RENDER_RESULTS_FILE")]
    NoDataDir,
    #[error("RFD_RENDER_WRAP_WIDTH must be a number >= 20, got '{0}'")]
    InvalidWrapWidth(String),
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Build configuration from a variable lookup. Empty values count as unset.
pub(crate) fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let results_file = match get(RESULTS_FILE_VAR) {
        Some(path) => PathBuf::from(path.trim()),
        None => paths::default_results_file().ok_or(ConfigError::NoDataDir)?,
    };

    let wrap_width = match get(WRAP_WIDTH_VAR) {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|w| *w >= MIN_WRAP_WIDTH)
            .ok_or_else(|| ConfigError::InvalidWrapWidth(raw.clone()))?,
        None => DEFAULT_WRAP_WIDTH,
    };

    Ok(Config {
        results_file,
        wrap_width,
    })
}
