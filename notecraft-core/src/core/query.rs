//! Read-only projection of the note collection into the sidebar views.

use crate::Note;
use std::cmp::Reverse;

/// The two ordered note lists shown to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection<'a> {
    /// Non-archived notes: pinned first, then most recently updated.
    pub active: Vec<&'a Note>,
    /// Archived notes, most recently updated first.
    pub archived: Vec<&'a Note>,
}

impl Projection<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.archived.is_empty()
    }
}

/// Filters and orders `notes` without touching them.
///
/// `query` is a case-insensitive substring matched against title or content;
/// an empty query matches everything. Every id in `tag_filter` must be carried
/// by a note for it to match.
///
/// ```rust
/// use notecraft_core::{project, Note};
///
/// let mut a = Note::new(1);
/// a.title = "Shopping".into();
/// a.tags = vec!["home".into(), "errands".into()];
/// let b = Note::new(2);
/// let notes = vec![a, b];
///
/// let view = project(&notes, "shop", &["home".to_string()]);
/// assert_eq!(view.active.len(), 1);
/// assert_eq!(view.active[0].title, "Shopping");
/// ```
pub fn project<'a>(notes: &'a [Note], query: &str, tag_filter: &[String]) -> Projection<'a> {
    let needle = query.to_lowercase();
    let (mut active, mut archived): (Vec<&Note>, Vec<&Note>) = notes
        .iter()
        .filter(|n| matches_text(n, &needle) && matches_tags(n, tag_filter))
        .partition(|n| !n.archived);

    active.sort_by_key(|n| (Reverse(n.pinned), Reverse(n.updated_at)));
    archived.sort_by_key(|n| Reverse(n.updated_at));

    Projection { active, archived }
}

fn matches_text(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

fn matches_tags(note: &Note, tag_filter: &[String]) -> bool {
    tag_filter.iter().all(|t| note.has_tag(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str, updated_at: i64) -> Note {
        let mut n = Note::new(0);
        n.title = title.to_string();
        n.content = content.to_string();
        n.updated_at = updated_at;
        n
    }

    fn titles(view: &[&Note]) -> Vec<String> {
        view.iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn test_active_sorted_pinned_then_recent() {
        let mut pinned_old = note("pinned old", "", 10);
        pinned_old.pinned = true;
        let notes = vec![note("mid", "", 50), pinned_old, note("new", "", 90)];

        let view = project(&notes, "", &[]);
        assert_eq!(titles(&view.active), vec!["pinned old", "new", "mid"]);
        assert!(view.archived.is_empty());
    }

    #[test]
    fn test_archived_sorted_recent_first_and_excluded_from_active() {
        let mut a = note("a", "", 10);
        a.archived = true;
        let mut b = note("b", "", 20);
        b.archived = true;
        b.pinned = true;
        let notes = vec![a, b, note("c", "", 5)];

        let view = project(&notes, "", &[]);
        assert_eq!(titles(&view.active), vec!["c"]);
        assert_eq!(titles(&view.archived), vec!["b", "a"]);
    }

    #[test]
    fn test_query_is_case_insensitive_over_title_or_content() {
        let notes = vec![
            note("Meeting", "", 1),
            note("Other", "agenda for the MEETING", 2),
            note("Unrelated", "nothing", 3),
        ];
        let view = project(&notes, "meeting", &[]);
        assert_eq!(titles(&view.active), vec!["Other", "Meeting"]);
    }

    #[test]
    fn test_tag_filter_uses_and_semantics() {
        let mut n = note("tagged", "", 1);
        n.tags = vec!["A".into(), "B".into()];
        let notes = vec![n];

        let ab = ["A".to_string(), "B".to_string()];
        let a = ["A".to_string()];
        let ac = ["A".to_string(), "C".to_string()];
        assert_eq!(project(&notes, "", &ab).active.len(), 1);
        assert_eq!(project(&notes, "", &a).active.len(), 1);
        assert!(project(&notes, "", &ac).is_empty());
    }

    #[test]
    fn test_projection_does_not_reorder_input() {
        let notes = vec![note("old", "", 1), note("new", "", 2)];
        let before = notes.clone();
        let _ = project(&notes, "", &[]);
        assert_eq!(notes, before);
    }

    #[test]
    fn test_equal_keys_keep_collection_order() {
        let notes = vec![note("first", "", 5), note("second", "", 5)];
        let view = project(&notes, "", &[]);
        assert_eq!(titles(&view.active), vec!["first", "second"]);
    }
}
