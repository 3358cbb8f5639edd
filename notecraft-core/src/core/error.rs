//! Error types for the NoteCraft core library.
//!
//! Store mutations, snapshot commits, rendering and projection never fail:
//! they absorb invalid targets as no-ops. Only the settings file layer can
//! produce a [`NotecraftError`].

use thiserror::Error;

/// All errors that can occur within the NoteCraft core library.
#[derive(Debug, Error)]
pub enum NotecraftError {
    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings data could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A settings value is outside its accepted range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Convenience alias that pins the error type to [`NotecraftError`].
pub type Result<T> = std::result::Result<T, NotecraftError>;

impl NotecraftError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Settings format error: {e}"),
            Self::InvalidSettings(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_settings_user_message_is_the_reason() {
        let e = NotecraftError::InvalidSettings("historyLimit must be at least 1".to_string());
        assert_eq!(e.user_message(), "historyLimit must be at least 1");
        assert!(e.to_string().starts_with("Invalid settings"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let e: NotecraftError = parse.unwrap_err().into();
        assert!(matches!(e, NotecraftError::Json(_)));
        assert!(e.user_message().contains("Settings format error"));
    }
}
