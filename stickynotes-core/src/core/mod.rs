//! Storage, rendering and session logic, one concern per file.
//!
//! `note`, `color` and `storage` hold the persisted data. `preview`, `grid`,
//! `reconcile` and `debounce` are pure helpers over it, and `session` drives
//! them through the toolkit seams in `window`.

pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod grid;
pub mod live_note;
pub mod note;
pub mod preview;
pub mod reconcile;
pub mod session;
pub mod storage;
pub mod window;

#[doc(inline)]
pub use color::{ColorStyle, NoteColor};
#[doc(inline)]
pub use config::AppConfig;
#[doc(inline)]
pub use debounce::Debouncer;
#[doc(inline)]
pub use error::{Result, StickyNotesError};
#[doc(inline)]
pub use grid::{GridState, PreviewCard, PreviewGrid};
#[doc(inline)]
pub use live_note::LiveNote;
#[doc(inline)]
pub use note::NoteRecord;
#[doc(inline)]
pub use preview::NotePreview;
#[doc(inline)]
pub use reconcile::ReconcilePlan;
#[doc(inline)]
pub use session::StickyNotes;
#[doc(inline)]
pub use storage::{NoteMap, NoteStore};
#[doc(inline)]
pub use window::{NoteButton, NoteEvents, NoteWindow, WindowHost};
