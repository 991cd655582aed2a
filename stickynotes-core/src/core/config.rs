//! Runtime configuration for a Sticky Notes session.
//!
//! The only externally chosen input is the location of the notes file; the
//! remaining knobs exist so tests and embedders can shorten the autosave
//! delay or move the default spawn point.

use crate::core::note::DEFAULT_POSITION;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the notes document inside the user data directory.
pub const DATA_FILE_NAME: &str = "sticky-notes.json";

/// Delay between the last keystroke and the autosave it triggers.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// Settings a [`StickyNotes`](crate::StickyNotes) session runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// The JSON document holding every note.
    pub data_file: PathBuf,
    /// How long an edited note waits for more input before it is saved.
    pub autosave_delay: Duration,
    /// Where freshly created notes open.
    pub default_position: (i32, i32),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_data_file(default_data_file())
    }
}

impl AppConfig {
    /// Default settings pointing at a custom notes file.
    pub fn with_data_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            data_file: path.as_ref().to_path_buf(),
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            default_position: DEFAULT_POSITION,
        }
    }
}

/// Returns the path to the notes file.
///
/// - Linux: `~/.local/share/sticky-notes.json`
/// - macOS: `~/Library/Application Support/sticky-notes.json`
/// - Windows: `%LOCALAPPDATA%/sticky-notes.json`
pub fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FILE_NAME)
}
