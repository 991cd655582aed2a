//! Core library for Sticky Notes: small coloured note windows backed by a
//! single JSON file, plus a main window with a searchable grid of previews.
//!
//! The primary entry point is [`StickyNotes`], the session controller that
//! owns the [`NoteStore`] and drives a toolkit-provided [`WindowHost`]. The
//! GUI toolkit itself stays outside this crate; it only implements the
//! collaborator traits in [`core::window`] and forwards user events through
//! [`NoteEvents`].
//!
//! Shells only need `use stickynotes_core::...`: everything a host touches is
//! available at the top level, and the paths under `core` may move.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    color::{ColorStyle, NoteColor},
    config::{default_data_file, AppConfig},
    debounce::Debouncer,
    error::{Result, StickyNotesError},
    grid::{GridState, PreviewCard, PreviewGrid},
    live_note::LiveNote,
    note::NoteRecord,
    preview::{render, NotePreview},
    reconcile::{plan, ReconcilePlan},
    session::StickyNotes,
    storage::{load_notes, read_notes, write_notes, NoteMap, NoteStore},
    window::{NoteButton, NoteEvents, NoteWindow, WindowHost},
};
