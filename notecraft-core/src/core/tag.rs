use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A label that notes can carry. Names are free text and need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Tag {
    /// Builds a tag with a fresh id, trimming `name`.
    ///
    /// Returns `None` when the trimmed name is empty.
    pub fn new(name: &str, color: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: color.to_string(),
        })
    }
}
