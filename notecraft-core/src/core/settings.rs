//! Editor settings persistence.
//!
//! Stores autosave tuning in a JSON file at an OS-appropriate location. A
//! missing or unreadable file never blocks the editor: loading falls back to
//! the defaults.

use crate::core::version_engine::{DEFAULT_HISTORY_LIMIT, DEFAULT_QUIET_PERIOD_MS};
use crate::{NotecraftError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default length of the plain-text preview shown in note lists.
pub const DEFAULT_SNIPPET_LENGTH: usize = 55;

/// Persisted editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// Quiet period after the last edit before a snapshot is committed.
    pub debounce_ms: i64,
    /// Snapshots retained per note.
    pub history_limit: usize,
    /// Characters shown in note list previews.
    pub snippet_length: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_QUIET_PERIOD_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
        }
    }
}

impl EditorSettings {
    /// # Errors
    ///
    /// Returns [`NotecraftError::InvalidSettings`] for a negative debounce or a
    /// history limit of zero.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms < 0 {
            return Err(NotecraftError::InvalidSettings(format!(
                "debounceMs must not be negative (got {})",
                self.debounce_ms
            )));
        }
        if self.history_limit == 0 {
            return Err(NotecraftError::InvalidSettings(
                "historyLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/notecraft/settings.json`
/// - Windows: `%APPDATA%/NoteCraft/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("NoteCraft").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("notecraft").join("settings.json")
    }
}

/// Loads settings from the default location.
pub fn load_settings() -> EditorSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing,
/// corrupt, or holds out-of-range values.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> EditorSettings {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return EditorSettings::default(),
    };
    let parsed = serde_json::from_str::<EditorSettings>(&content)
        .map_err(NotecraftError::from)
        .and_then(|s| s.validate().map(|()| s));
    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("ignoring settings at {}: {e}", path.display());
            EditorSettings::default()
        }
    }
}

/// Saves settings to the default location.
///
/// # Errors
///
/// See [`save_settings_to`].
pub fn save_settings(settings: &EditorSettings) -> Result<()> {
    save_settings_to(settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`NotecraftError::InvalidSettings`] if validation fails,
/// [`NotecraftError::Json`] if serialization fails, or
/// [`NotecraftError::Io`] if the file cannot be written.
pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &EditorSettings) -> Result<()> {
    settings.validate()?;
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
