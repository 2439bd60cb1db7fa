//! Persisted linter settings.
//!
//! Stored as `.namelint/data.json` under the store root:
//!
//! ```json
//! { "autoLintOnCreate": false, "autoLintOnRename": false }
//! ```
//!
//! Loading merges whatever fields are present over the defaults; unknown
//! fields are ignored. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Directory under the store root that holds namelint state.
pub const STATE_DIR: &str = ".namelint";
/// Settings file name inside `STATE_DIR`.
pub const SETTINGS_FILE: &str = "data.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterSettings {
    pub auto_lint_on_create: bool,
    pub auto_lint_on_rename: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Settings as found on disk; every field may be missing.
struct StoredSettings {
    auto_lint_on_create: Option<bool>,
    auto_lint_on_rename: Option<bool>,
}

impl LinterSettings {
    /// Overlay the fields present in `stored` on top of `self`.
    fn merged(self, stored: StoredSettings) -> Self {
        LinterSettings {
            auto_lint_on_create: stored.auto_lint_on_create.unwrap_or(self.auto_lint_on_create),
            auto_lint_on_rename: stored.auto_lint_on_rename.unwrap_or(self.auto_lint_on_rename),
        }
    }

    /// Parse settings JSON merged over defaults.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        let stored: StoredSettings = serde_json::from_str(s)?;
        Ok(LinterSettings::default().merged(stored))
    }
}

/// Location of the settings file for a store rooted at `root`.
pub fn settings_path(root: &Path) -> PathBuf {
    root.join(STATE_DIR).join(SETTINGS_FILE)
}

/// Load settings for the store at `root`, merged over defaults.
pub async fn load(root: &Path) -> Result<LinterSettings> {
    let path = settings_path(root);
    let data = match fs::read_to_string(&path).await {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinterSettings::default()),
        Err(e) => {
            return Err(SettingsError::Read {
                path: path.to_string_lossy().to_string(),
                source: e,
            })
        }
    };
    if data.trim().is_empty() {
        return Ok(LinterSettings::default());
    }
    LinterSettings::from_json(&data).map_err(|e| SettingsError::Parse {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Persist `settings` for the store at `root`.
pub async fn save(root: &Path, settings: &LinterSettings) -> Result<()> {
    let path = settings_path(root);
    let write_err = |source| SettingsError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let body = serde_json::to_string_pretty(settings).map_err(io::Error::other).map_err(write_err)?;
    fs::write(&path, body).await.map_err(write_err)?;
    Ok(())
}
