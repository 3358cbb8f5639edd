//! Internal domain modules for the NoteCraft core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod clock;
pub mod color;
pub mod display;
pub mod error;
pub mod intent;
pub mod markdown;
pub mod note;
pub mod notebook;
pub mod query;
pub mod seed;
pub mod settings;
pub mod tag;
pub mod version_engine;

#[doc(inline)]
pub use clock::{Clock, ManualClock, SystemClock};
#[doc(inline)]
pub use color::NoteColor;
#[doc(inline)]
pub use display::{display_title, insert_markup, preview_snippet, relative_time};
#[doc(inline)]
pub use error::{NotecraftError, Result};
#[doc(inline)]
pub use intent::Intent;
#[doc(inline)]
pub use markdown::{escape_html, render_markdown, EMPTY_PREVIEW};
#[doc(inline)]
pub use note::{Note, NoteField, Snapshot};
#[doc(inline)]
pub use notebook::Notebook;
#[doc(inline)]
pub use query::{project, Projection};
#[doc(inline)]
pub use settings::{load_settings, save_settings, EditorSettings};
#[doc(inline)]
pub use tag::Tag;
#[doc(inline)]
pub use version_engine::{CommitReport, SaveStatus, VersionEngine};
