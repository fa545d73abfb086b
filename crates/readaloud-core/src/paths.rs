//! Data directory resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "READALOUD_DATA_DIR";

const SETTINGS_FILE: &str = "settings.json";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `READALOUD_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/readaloud`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("readaloud");

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Location of the settings file.
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(SETTINGS_FILE))
}
