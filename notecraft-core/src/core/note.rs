use crate::NoteColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of a note's title and content at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Time-ordered UUIDv7.
    pub id: String,
    /// The note's version number once this snapshot was committed.
    pub version: u64,
    pub title: String,
    pub content: String,
    pub saved_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Tag ids. Ids whose tag no longer exists are kept but ignored by consumers.
    pub tags: Vec<String>,
    pub color: NoteColor,
    pub pinned: bool,
    pub archived: bool,
    pub version: u64,
    /// Oldest first, bounded by the history limit.
    pub versions: Vec<Snapshot>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note at version 1 with no history.
    pub fn new(now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            tags: Vec::new(),
            color: NoteColor::Unset,
            pinned: false,
            archived: false,
            version: 1,
            versions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the most recently committed snapshot, if any.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.versions.last()
    }

    #[must_use]
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    #[must_use]
    pub fn find_snapshot(&self, snapshot_id: &str) -> Option<&Snapshot> {
        self.versions.iter().find(|s| s.id == snapshot_id)
    }

    /// Applies a field edit and refreshes `updated_at`.
    pub fn apply(&mut self, field: NoteField, now: i64) {
        match field {
            NoteField::Title(title) => self.title = title,
            NoteField::Content(content) => self.content = content,
            NoteField::Tags(tags) => self.tags = tags,
        }
        self.updated_at = now;
    }
}

/// A user-editable field with its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "field", content = "value")]
pub enum NoteField {
    Title(String),
    Content(String),
    Tags(Vec<String>),
}
