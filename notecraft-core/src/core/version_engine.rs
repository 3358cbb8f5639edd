//! Debounced snapshotting of note edits.
//!
//! Field edits land in the store immediately; the [`VersionEngine`] decides
//! when they become durable [`Snapshot`]s. Every call to
//! [`schedule_snapshot`](VersionEngine::schedule_snapshot) replaces the single
//! pending commit and restarts the quiet period, so a burst of keystrokes
//! collapses into one commit carrying the latest state.
//!
//! The engine never reads a clock itself. Callers pass `now` (Unix
//! milliseconds) and drive the timer with [`poll`](VersionEngine::poll).
//!
//! ```rust
//! use notecraft_core::{Note, NoteField, SaveStatus, VersionEngine};
//!
//! let mut notes = vec![Note::new(0)];
//! let mut engine = VersionEngine::new(1_200, 15);
//!
//! notes[0].apply(NoteField::Content("h".into()), 10);
//! engine.schedule_snapshot(&notes, 10);
//! notes[0].apply(NoteField::Content("hi".into()), 500);
//! engine.schedule_snapshot(&notes, 500);
//! assert_eq!(engine.status(), SaveStatus::Saving);
//!
//! // Quiet period counts from the last edit.
//! assert!(engine.poll(&mut notes, 1_300).is_none());
//! let report = engine.poll(&mut notes, 1_700).unwrap();
//! assert_eq!(report.committed.len(), 1);
//! assert_eq!(notes[0].version, 2);
//! assert_eq!(notes[0].versions[0].content, "hi");
//! assert_eq!(engine.status(), SaveStatus::Saved);
//! ```

use crate::{EditorSettings, Note, Snapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Quiet period after the last edit before a commit fires.
pub const DEFAULT_QUIET_PERIOD_MS: i64 = 1_200;

/// Number of snapshots retained per note.
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

/// Autosave indicator observed by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveStatus {
    Saving,
    Saved,
}

impl SaveStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Saving => "Saving…",
            Self::Saved => "Saved",
        }
    }
}

/// The title and content of one note as captured at scheduling time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    title: String,
    content: String,
}

/// The single outstanding commit. Owned by the engine; replaced on reschedule.
#[derive(Debug)]
pub struct PendingCommit {
    drafts: HashMap<String, Draft>,
    due_at: i64,
}

impl PendingCommit {
    /// Instant (Unix millis) at which the commit fires.
    #[must_use]
    pub fn due_at(&self) -> i64 {
        self.due_at
    }
}

/// Outcome of one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Ids of notes that received a new snapshot, in store order.
    pub committed: Vec<String>,
    /// Notes whose title and content matched their last snapshot.
    pub unchanged: usize,
    /// Batch entries whose note no longer exists in the store.
    pub skipped: usize,
}

/// Debounces edits into bounded, change-detected snapshot history.
#[derive(Debug)]
pub struct VersionEngine {
    quiet_period_ms: i64,
    history_limit: usize,
    pending: Option<PendingCommit>,
    status: SaveStatus,
}

impl Default for VersionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD_MS, DEFAULT_HISTORY_LIMIT)
    }
}

impl VersionEngine {
    /// Creates an idle engine. A `history_limit` of zero is treated as one.
    pub fn new(quiet_period_ms: i64, history_limit: usize) -> Self {
        Self {
            quiet_period_ms: quiet_period_ms.max(0),
            history_limit: history_limit.max(1),
            pending: None,
            status: SaveStatus::Saved,
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(settings.debounce_ms, settings.history_limit)
    }

    #[must_use]
    pub fn status(&self) -> SaveStatus {
        self.status
    }

    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingCommit> {
        self.pending.as_ref()
    }

    /// When the pending commit fires, or `None` when idle.
    #[must_use]
    pub fn next_deadline(&self) -> Option<i64> {
        self.pending.as_ref().map(PendingCommit::due_at)
    }

    /// Captures `batch` and (re)starts the quiet period.
    ///
    /// Any previously scheduled commit is dropped; the new one carries the
    /// complete current state, so nothing is lost by the replacement.
    pub fn schedule_snapshot(&mut self, batch: &[Note], now: i64) {
        let drafts = batch
            .iter()
            .map(|n| {
                (
                    n.id.clone(),
                    Draft {
                        title: n.title.clone(),
                        content: n.content.clone(),
                    },
                )
            })
            .collect();
        let replaced = self.pending.is_some();
        self.pending = Some(PendingCommit {
            drafts,
            due_at: now + self.quiet_period_ms,
        });
        self.status = SaveStatus::Saving;
        log::debug!(
            "snapshot scheduled for {} notes at +{}ms (replaced pending: {replaced})",
            batch.len(),
            self.quiet_period_ms
        );
    }

    /// Commits the pending batch into `notes` if its quiet period has elapsed.
    ///
    /// Returns `None` when nothing fired.
    pub fn poll(&mut self, notes: &mut [Note], now: i64) -> Option<CommitReport> {
        match &self.pending {
            Some(p) if now >= p.due_at => self.flush(notes, now),
            _ => None,
        }
    }

    /// Commits the pending batch immediately, regardless of the quiet period.
    ///
    /// Intended for shutdown; returns `None` when nothing was pending.
    pub fn flush(&mut self, notes: &mut [Note], now: i64) -> Option<CommitReport> {
        let pending = self.pending.take()?;
        let report = commit_batch(pending.drafts, notes, now, self.history_limit);
        self.status = SaveStatus::Saved;
        if !report.committed.is_empty() {
            log::info!(
                "committed {} snapshot(s), {} unchanged, {} skipped",
                report.committed.len(),
                report.unchanged,
                report.skipped
            );
        }
        Some(report)
    }
}

fn commit_batch(
    mut drafts: HashMap<String, Draft>,
    notes: &mut [Note],
    now: i64,
    history_limit: usize,
) -> CommitReport {
    let mut report = CommitReport::default();
    for note in notes.iter_mut() {
        let Some(draft) = drafts.remove(&note.id) else { continue };
        if commit_snapshot(note, draft.title, draft.content, now, history_limit) {
            report.committed.push(note.id.clone());
        } else {
            report.unchanged += 1;
        }
    }
    // Whatever is left refers to notes deleted while the commit was pending.
    report.skipped = drafts.len();
    if report.skipped > 0 {
        log::debug!("skipped {} snapshot(s) for removed notes", report.skipped);
    }
    report
}

/// Appends a snapshot of `title`/`content` to `note` when they differ from its
/// last snapshot. A note without history always counts as changed.
///
/// Returns `true` when a snapshot was appended. The version is bumped by
/// exactly one and the oldest snapshots are evicted beyond `history_limit`.
pub fn commit_snapshot(
    note: &mut Note,
    title: String,
    content: String,
    now: i64,
    history_limit: usize,
) -> bool {
    let changed = match note.last_snapshot() {
        None => true,
        Some(last) => last.title != title || last.content != content,
    };
    if !changed {
        return false;
    }

    let version = note.version + 1;
    note.versions.push(Snapshot {
        id: Uuid::now_v7().to_string(),
        version,
        title: title.clone(),
        content: content.clone(),
        saved_at: now,
    });
    let limit = history_limit.max(1);
    if note.versions.len() > limit {
        let excess = note.versions.len() - limit;
        note.versions.drain(..excess);
    }
    note.title = title;
    note.content = content;
    note.version = version;
    true
}
