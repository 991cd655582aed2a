//! An open note window together with the state the toolkit does not track.

use crate::{NoteColor, NoteRecord, NoteWindow};

/// In-memory state of one open note.
///
/// The text lives in the window's buffer; colour, position and the drag
/// origin live here. [`LiveNote::snapshot`] combines both into a record.
#[derive(Debug)]
pub struct LiveNote<W> {
    id: String,
    title: Option<String>,
    color: NoteColor,
    x: i32,
    y: i32,
    /// When the note was last written to the store.
    timestamp: Option<String>,
    drag_origin: Option<(i32, i32)>,
    window: W,
}

impl<W: NoteWindow> LiveNote<W> {
    /// Wraps `window`, loading `record`'s content and colour into it.
    pub fn new(record: &NoteRecord, mut window: W) -> Self {
        window.set_text(&record.content);
        window.apply_color(record.color);
        window.move_to(record.x, record.y);
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            color: record.color,
            x: record.x,
            y: record.y,
            timestamp: record.timestamp.clone(),
            drag_origin: None,
            window,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn color(&self) -> NoteColor {
        self.color
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn set_color(&mut self, color: NoteColor) {
        self.color = color;
        self.window.apply_color(color);
    }

    /// Remembers where the window was when the drag started.
    pub fn begin_drag(&mut self) {
        self.drag_origin = Some((self.x, self.y));
    }

    /// Moves the window to the drag origin plus the pointer offset.
    ///
    /// Updates without a preceding [`begin_drag`](Self::begin_drag) are
    /// measured from the current position.
    pub fn update_drag(&mut self, offset_x: f64, offset_y: f64) {
        let (ox, oy) = *self.drag_origin.get_or_insert((self.x, self.y));
        self.x = (f64::from(ox) + offset_x) as i32;
        self.y = (f64::from(oy) + offset_y) as i32;
        self.window.move_to(self.x, self.y);
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Current state with the last saved timestamp. Nothing is persisted.
    pub fn snapshot(&self) -> NoteRecord {
        NoteRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.window.text(),
            color: self.color,
            x: self.x,
            y: self.y,
            timestamp: self.timestamp.clone(),
        }
    }

    /// Current state stamped with the current time, for writing to the store.
    pub fn snapshot_for_save(&mut self) -> NoteRecord {
        let mut record = self.snapshot();
        record.touch();
        self.timestamp = record.timestamp.clone();
        record
    }

    /// Consumes the note and closes its window.
    pub fn close(mut self) {
        self.window.close();
    }
}
