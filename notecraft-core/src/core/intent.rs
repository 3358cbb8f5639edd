//! User intents dispatched by the presentation shell into the notebook.

use crate::{NoteColor, NoteField};
use serde::{Deserialize, Serialize};

/// A single user action against the notebook.
///
/// Shells translate clicks and keystrokes into intents and hand them to
/// [`Notebook::dispatch`](crate::Notebook::dispatch), which processes each one
/// to completion before the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// Create an empty note at the top of the collection and make it active.
    Create,
    /// Change the active note; `None` clears the selection.
    Select { note_id: Option<String> },
    /// Edit title, content or tag set. Routed through the version engine.
    Edit { note_id: String, field: NoteField },
    /// Add the tag if absent, remove it if present. Routed through the version engine.
    ToggleTag { note_id: String, tag_id: String },
    SetColor { note_id: String, color: NoteColor },
    TogglePin { note_id: String },
    Archive { note_id: String },
    /// Take a note out of the archive.
    Restore { note_id: String },
    /// Remove a note and its whole history.
    Delete { note_id: String },
    /// Overwrite live title and content from one of the note's snapshots.
    RestoreVersion { note_id: String, snapshot_id: String },
}

impl Intent {
    /// Returns the note this intent targets, if any.
    #[must_use]
    pub fn note_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Select { note_id } => note_id.as_deref(),
            Self::Edit { note_id, .. }
            | Self::ToggleTag { note_id, .. }
            | Self::SetColor { note_id, .. }
            | Self::TogglePin { note_id }
            | Self::Archive { note_id }
            | Self::Restore { note_id }
            | Self::Delete { note_id }
            | Self::RestoreVersion { note_id, .. } => Some(note_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::Edit {
            note_id: "n-1".to_string(),
            field: NoteField::Title("Plans".to_string()),
        };
        let json = serde_json::to_string(&intent).unwrap();
        assert!(json.contains("\"type\":\"Edit\""));
        let parsed: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intent);
    }

    #[test]
    fn test_note_id_accessor() {
        assert_eq!(Intent::Create.note_id(), None);
        assert_eq!(Intent::Select { note_id: None }.note_id(), None);
        let delete = Intent::Delete {
            note_id: "x".to_string(),
        };
        assert_eq!(delete.note_id(), Some("x"));
    }
}
