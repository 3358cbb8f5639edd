//! The in-memory note store and the entry point for every user intent.

use crate::core::seed;
use crate::{
    preview_snippet, project, render_markdown, Clock, CommitReport, EditorSettings, Intent, Note,
    NoteColor, NoteField, Projection, SaveStatus, SystemClock, Tag, VersionEngine,
};

/// An open notebook: notes, the tag catalogue, the active selection and the
/// autosave engine.
///
/// All mutations go through `Notebook` methods (or [`Notebook::dispatch`]).
/// Invalid targets such as unknown note ids are absorbed as no-ops; methods
/// report whether anything changed instead of returning errors.
///
/// Title, content and tag edits are applied immediately and scheduled for a
/// debounced snapshot. Call [`Notebook::tick`] from the shell's event loop
/// (for example when [`Notebook::next_deadline`] passes) to let the pending
/// commit fire, and [`Notebook::flush`] on shutdown.
pub struct Notebook {
    notes: Vec<Note>,
    tags: Vec<Tag>,
    active_id: Option<String>,
    engine: VersionEngine,
    settings: EditorSettings,
    clock: Box<dyn Clock>,
}

impl Notebook {
    /// Creates an empty notebook reading time from `clock`.
    pub fn new(settings: EditorSettings, clock: impl Clock + 'static) -> Self {
        Self {
            notes: Vec::new(),
            tags: Vec::new(),
            active_id: None,
            engine: VersionEngine::from_settings(&settings),
            settings,
            clock: Box::new(clock),
        }
    }

    /// Creates an empty notebook on the system clock.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self::new(settings, SystemClock)
    }

    /// Creates a notebook holding the sample notes and tags, with the welcome
    /// note active.
    pub fn with_welcome_notes(settings: EditorSettings, clock: impl Clock + 'static) -> Self {
        let mut notebook = Self::new(settings, clock);
        let now = notebook.clock.now_millis();
        notebook.notes = seed::welcome_notes(now);
        notebook.tags = seed::starter_tags();
        notebook.active_id = notebook.notes.first().map(|n| n.id.clone());
        notebook
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// All notes in collection order (newest created first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.note(id))
    }

    pub fn save_status(&self) -> SaveStatus {
        self.engine.status()
    }

    /// When the pending snapshot commit is due (Unix millis), if one is pending.
    pub fn next_deadline(&self) -> Option<i64> {
        self.engine.next_deadline()
    }

    /// Resolves a note's tag ids against the catalogue, skipping ids whose
    /// tag has been deleted.
    pub fn tags_for<'a>(&'a self, note: &Note) -> Vec<&'a Tag> {
        self.tags.iter().filter(|t| note.has_tag(&t.id)).collect()
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Projects the notes into active and archived lists.
    ///
    /// A filter id that no longer names a tag in the catalogue matches no
    /// note, so requiring it yields empty views.
    pub fn project(&self, query: &str, tag_filter: &[String]) -> Projection<'_> {
        if let Some(unknown) = tag_filter
            .iter()
            .find(|id| !self.tags.iter().any(|t| &t.id == *id))
        {
            log::debug!("project: filter tag {unknown} not in catalogue");
            return Projection::default();
        }
        project(&self.notes, query, tag_filter)
    }

    /// Plain-text list preview of a note, cut to the configured snippet length.
    pub fn snippet(&self, note: &Note) -> String {
        preview_snippet(&note.content, self.settings.snippet_length)
    }

    /// Renders a note's content for the preview pane.
    pub fn preview(&self, note_id: &str) -> Option<String> {
        self.note(note_id).map(|n| render_markdown(&n.content))
    }

    // ── Autosave ─────────────────────────────────────────────────────

    /// Commits the pending snapshot batch if its quiet period has elapsed.
    pub fn tick(&mut self) -> Option<CommitReport> {
        let now = self.clock.now_millis();
        self.engine.poll(&mut self.notes, now)
    }

    /// Commits the pending snapshot batch immediately.
    pub fn flush(&mut self) -> Option<CommitReport> {
        let now = self.clock.now_millis();
        self.engine.flush(&mut self.notes, now)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Processes one intent to completion. Returns `true` if the store or the
    /// selection changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        log::debug!("dispatch {intent:?}");
        if let Some(id) = intent.note_id() {
            if self.note(id).is_none() {
                log::debug!("dispatch: note {id} not found");
                return false;
            }
        }
        match intent {
            Intent::Create => {
                self.create_note();
                true
            }
            Intent::Select { note_id } => self.select(note_id.as_deref()),
            Intent::Edit { note_id, field } => self.edit(&note_id, field),
            Intent::ToggleTag { note_id, tag_id } => self.toggle_tag(&note_id, &tag_id),
            Intent::SetColor { note_id, color } => self.set_color(&note_id, color),
            Intent::TogglePin { note_id } => self.toggle_pin(&note_id),
            Intent::Archive { note_id } => self.archive(&note_id),
            Intent::Restore { note_id } => self.restore(&note_id),
            Intent::Delete { note_id } => self.delete(&note_id),
            Intent::RestoreVersion {
                note_id,
                snapshot_id,
            } => self.restore_version(&note_id, &snapshot_id),
        }
    }

    /// Creates an empty note at the top of the collection, makes it active and
    /// returns its id.
    pub fn create_note(&mut self) -> String {
        let note = Note::new(self.clock.now_millis());
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.active_id = Some(id.clone());
        id
    }

    /// Changes the active note. Selecting an unknown id is a no-op.
    pub fn select(&mut self, note_id: Option<&str>) -> bool {
        match note_id {
            Some(id) if self.note(id).is_none() => {
                log::debug!("select: note {id} not found");
                false
            }
            _ => {
                self.active_id = note_id.map(str::to_string);
                true
            }
        }
    }

    /// Applies a field edit immediately and schedules a snapshot of the
    /// resulting collection. Returns the updated collection.
    pub fn mutate(&mut self, note_id: &str, field: NoteField) -> &[Note] {
        self.edit(note_id, field);
        &self.notes
    }

    /// Adds `tag_id` to the note if absent, removes it otherwise.
    ///
    /// The id is not checked against the catalogue; unknown ids are recorded
    /// and ignored by [`Notebook::tags_for`] and [`Notebook::project`].
    pub fn toggle_tag(&mut self, note_id: &str, tag_id: &str) -> bool {
        let Some(note) = self.note(note_id) else {
            log::debug!("toggle_tag: note {note_id} not found");
            return false;
        };
        let tags = if note.has_tag(tag_id) {
            note.tags.iter().filter(|t| *t != tag_id).cloned().collect()
        } else {
            let mut tags = note.tags.clone();
            tags.push(tag_id.to_string());
            tags
        };
        self.edit(note_id, NoteField::Tags(tags))
    }

    pub fn set_color(&mut self, note_id: &str, color: NoteColor) -> bool {
        self.update_flags(note_id, |n| n.color = color)
    }

    pub fn toggle_pin(&mut self, note_id: &str) -> bool {
        self.update_flags(note_id, |n| n.pinned = !n.pinned)
    }

    /// Moves a note to the archive. If it was active, the first other
    /// non-archived note becomes active.
    pub fn archive(&mut self, note_id: &str) -> bool {
        if !self.update_flags(note_id, |n| n.archived = true) {
            return false;
        }
        self.reassign_active_from(note_id);
        true
    }

    /// Takes a note out of the archive. The active selection is unchanged.
    pub fn restore(&mut self, note_id: &str) -> bool {
        self.update_flags(note_id, |n| n.archived = false)
    }

    /// Removes a note and its entire history.
    pub fn delete(&mut self, note_id: &str) -> bool {
        let Some(pos) = self.notes.iter().position(|n| n.id == note_id) else {
            log::debug!("delete: note {note_id} not found");
            return false;
        };
        self.notes.remove(pos);
        self.reassign_active_from(note_id);
        true
    }

    /// Overwrites the note's live title and content from one of its snapshots.
    ///
    /// History and version number are left untouched; `updated_at` becomes the
    /// restoration time. If a commit is pending it is rescheduled with the
    /// restored state so it cannot overwrite it.
    pub fn restore_version(&mut self, note_id: &str, snapshot_id: &str) -> bool {
        let now = self.clock.now_millis();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) else {
            log::debug!("restore_version: note {note_id} not found");
            return false;
        };
        let Some(snapshot) = note.find_snapshot(snapshot_id).cloned() else {
            log::debug!("restore_version: snapshot {snapshot_id} not in history of {note_id}");
            return false;
        };
        note.title = snapshot.title;
        note.content = snapshot.content;
        note.updated_at = now;
        if self.engine.pending().is_some() {
            self.engine.schedule_snapshot(&self.notes, now);
        }
        true
    }

    /// Adds a tag to the catalogue and returns its id. Blank names are ignored.
    pub fn create_tag(&mut self, name: &str, color: &str) -> Option<String> {
        let tag = Tag::new(name, color)?;
        let id = tag.id.clone();
        self.tags.push(tag);
        Some(id)
    }

    /// Removes a tag from the catalogue. Notes keep the id; it simply stops
    /// resolving.
    pub fn delete_tag(&mut self, tag_id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != tag_id);
        self.tags.len() != before
    }

    fn edit(&mut self, note_id: &str, field: NoteField) -> bool {
        let now = self.clock.now_millis();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) else {
            log::debug!("edit: note {note_id} not found");
            return false;
        };
        note.apply(field, now);
        self.engine.schedule_snapshot(&self.notes, now);
        true
    }

    fn update_flags(&mut self, note_id: &str, change: impl FnOnce(&mut Note)) -> bool {
        let now = self.clock.now_millis();
        match self.notes.iter_mut().find(|n| n.id == note_id) {
            Some(note) => {
                change(note);
                note.updated_at = now;
                true
            }
            None => {
                log::debug!("note {note_id} not found");
                false
            }
        }
    }

    fn reassign_active_from(&mut self, removed_id: &str) {
        if self.active_id.as_deref() != Some(removed_id) {
            return;
        }
        self.active_id = self
            .notes
            .iter()
            .find(|n| n.id != removed_id && !n.archived)
            .map(|n| n.id.clone());
    }
}
