//! Color label for notes.

use serde::{Deserialize, Serialize};

/// The color label of a note.
///
/// `Unset` is a state of its own and is not a color; shells render it
/// differently from every palette entry.
///
/// ```rust
/// use notecraft_core::NoteColor;
///
/// let c = NoteColor::from("#43d9ad");
/// assert_eq!(c.value(), Some("#43d9ad"));
/// assert!(NoteColor::Unset.value().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum NoteColor {
    #[default]
    Unset,
    Value(String),
}

impl NoteColor {
    /// Returns the color value, or `None` when unset.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(v),
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<&str> for NoteColor {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<Option<String>> for NoteColor {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unset, Self::Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        assert_eq!(NoteColor::default(), NoteColor::Unset);
        assert!(!NoteColor::default().is_set());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(NoteColor::from(None::<String>), NoteColor::Unset);
        assert_eq!(
            NoteColor::from(Some("#ff6b6b".to_string())),
            NoteColor::Value("#ff6b6b".to_string())
        );
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_string(&NoteColor::from("#60a5fa")).unwrap();
        assert_eq!(json, r##"{"kind":"value","value":"#60a5fa"}"##);
        let json = serde_json::to_string(&NoteColor::Unset).unwrap();
        assert_eq!(json, r#"{"kind":"unset"}"#);
    }
}
