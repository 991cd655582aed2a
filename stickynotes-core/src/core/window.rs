//! Seams between the core and the GUI toolkit.
//!
//! The toolkit implements [`NoteWindow`] and [`WindowHost`]; the core never
//! sees widgets, CSS or gesture recognisers. In the other direction the
//! toolkit forwards user input to a [`NoteEvents`] implementation (the
//! session) instead of registering closures that reach back into shared
//! application state.

use crate::{NoteColor, NoteRecord, Result};
use std::time::Instant;

/// Capabilities the core needs from a single note window.
pub trait NoteWindow {
    /// Shows the window and raises it.
    fn present(&mut self);

    /// Full contents of the multi-line text buffer.
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    /// Repaints the window in `color`'s palette.
    fn apply_color(&mut self, color: NoteColor);

    /// Moves the window's surface to screen coordinates `(x, y)`.
    fn move_to(&mut self, x: i32, y: i32);

    /// Destroys the window. It is not used again afterwards.
    fn close(&mut self);
}

/// Creates note windows and controls the main window.
pub trait WindowHost {
    type Window: NoteWindow;

    /// Builds a hidden window for `record`; the caller decides whether to present it.
    fn open_note_window(&mut self, record: &NoteRecord) -> Self::Window;

    fn present_main_window(&mut self);

    fn hide_main_window(&mut self);

    fn is_main_window_visible(&self) -> bool;
}

/// Buttons on a note window's header bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteButton {
    /// Save, delete the note and close its window.
    Close,
    /// Open another, empty note.
    NewNote,
    /// An entry of the colour menu, carrying the raw menu parameter.
    Color(String),
}

/// User input forwarded from the toolkit, addressed by note id.
pub trait NoteEvents {
    /// The note's text buffer changed; `now` arms the autosave timer.
    fn on_text_changed(&mut self, id: &str, now: Instant) -> Result<()>;

    fn on_drag_begin(&mut self, id: &str) -> Result<()>;

    /// Pointer moved by `(offset_x, offset_y)` since the drag began.
    fn on_drag_update(&mut self, id: &str, offset_x: f64, offset_y: f64) -> Result<()>;

    fn on_drag_end(&mut self, id: &str) -> Result<()>;

    fn on_clicked(&mut self, id: &str, button: NoteButton) -> Result<()>;
}
