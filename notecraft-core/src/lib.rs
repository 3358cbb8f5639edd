//! Core library for NoteCraft, a minimal Markdown note editor.
//!
//! The primary entry point is [`Notebook`], which holds the notes, the tag
//! catalogue and the autosave engine. All mutations go through `Notebook`
//! methods or [`Notebook::dispatch`]; shells only render what it exposes.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    clock::{Clock, ManualClock, SystemClock},
    color::NoteColor,
    display::{display_title, insert_markup, preview_snippet, relative_time, SELECTION_PLACEHOLDER},
    error::{NotecraftError, Result},
    intent::Intent,
    markdown::{escape_html, render_markdown, EMPTY_PREVIEW},
    note::{Note, NoteField, Snapshot},
    notebook::Notebook,
    query::{project, Projection},
    seed::{starter_tags, welcome_notes},
    settings::{
        load_settings, load_settings_from, save_settings, save_settings_to, settings_file_path,
        EditorSettings, DEFAULT_SNIPPET_LENGTH,
    },
    tag::Tag,
    version_engine::{
        commit_snapshot, CommitReport, PendingCommit, SaveStatus, VersionEngine,
        DEFAULT_HISTORY_LIMIT, DEFAULT_QUIET_PERIOD_MS,
    },
};
