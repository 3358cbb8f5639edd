//! Sample content for a first launch.

use crate::{Note, NoteColor, Tag};

const WELCOME_TITLE: &str = "Welcome to NoteCraft ✦";
const WELCOME_CONTENT: &str = "# Welcome!\n\nThis is a **minimal** experimental note app.\n\n## Features\n\n- Write notes with Markdown\n- Toggle live preview\n- Auto-save with version history\n- Tags + color labels\n- Archive & pin notes\n- Search across all notes";

const BACKLOG_TITLE: &str = "Ideas backlog";
const BACKLOG_CONTENT: &str = "## Things to build\n\n- [ ] Dark mode toggle\n- [ ] Export to PDF\n- [x] Tag filtering\n- [x] Version history\n\n> The best ideas come when you stop trying.";

const HOUR_MS: i64 = 3_600_000;

/// The welcome and backlog notes, welcome first.
pub fn welcome_notes(now: i64) -> Vec<Note> {
    let sample = |title: &str, content: &str, color: &str, age: i64| Note {
        title: title.to_string(),
        content: content.to_string(),
        color: NoteColor::from(color),
        updated_at: now - age,
        ..Note::new(now)
    };
    vec![
        sample(WELCOME_TITLE, WELCOME_CONTENT, "#7c6fff", HOUR_MS),
        sample(BACKLOG_TITLE, BACKLOG_CONTENT, "#43d9ad", 2 * HOUR_MS),
    ]
}

pub fn starter_tags() -> Vec<Tag> {
    [("work", "#7c6fff"), ("ideas", "#43d9ad")]
        .into_iter()
        .filter_map(|(name, color)| Tag::new(name, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_markdown;

    #[test]
    fn test_welcome_notes_are_fresh() {
        let notes = welcome_notes(10 * HOUR_MS);
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.version == 1 && n.versions.is_empty()));
        assert_ne!(notes[0].id, notes[1].id);
        assert!(notes[0].updated_at > notes[1].updated_at);
    }

    #[test]
    fn test_backlog_renders_tasks_and_quote() {
        let notes = welcome_notes(0);
        let html = render_markdown(&notes[1].content);
        assert!(html.contains("<li>☐ Dark mode toggle</li>"));
        assert!(html.contains("<li>✅ Tag filtering</li>"));
        assert!(html.contains("<blockquote>The best ideas come when you stop trying.</blockquote>"));
    }

    #[test]
    fn test_starter_tags() {
        let names: Vec<String> = starter_tags().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["work", "ideas"]);
    }
}
