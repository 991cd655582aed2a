//! Error types for the Sticky Notes core library.

use thiserror::Error;

/// All errors that can occur within the Sticky Notes core library.
#[derive(Debug, Error)]
pub enum StickyNotesError {
    /// Reading or writing the notes file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The notes document could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A note ID was addressed that has no open window.
    #[error("Note not found: {0}")]
    NoteNotFound(String),
}

/// Convenience alias that pins the error type to [`StickyNotesError`].
pub type Result<T> = std::result::Result<T, StickyNotesError>;

impl StickyNotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
        }
    }
}
