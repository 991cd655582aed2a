//! Preview card text for the main window grid.
//!
//! [`render`] is a pure function of a [`NoteRecord`]: it never touches the
//! store or any window, so the grid can be rebuilt from live or stored data
//! alike.

use crate::{NoteColor, NoteRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Title shown when a note has neither a title nor any text.
pub const UNTITLED: &str = "Untitled";

/// Snippet shown for a note without content.
pub const EMPTY_NOTE: &str = "(empty note)";

/// Maximum number of content lines in a snippet.
pub const SNIPPET_MAX_LINES: usize = 6;

/// Maximum snippet length in characters, ellipsis included.
pub const SNIPPET_MAX_CHARS: usize = 150;

/// Marker appended to truncated snippets.
pub const ELLIPSIS: &str = "...";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Everything a preview card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePreview {
    pub title: String,
    /// `DD/MM/YYYY`, or empty when the note has no readable timestamp.
    pub date: String,
    pub snippet: String,
    pub color: NoteColor,
}

/// Builds the preview card for `record`.
pub fn render(record: &NoteRecord) -> NotePreview {
    let (title, title_line) = derive_title(record);
    NotePreview {
        title,
        date: record
            .timestamp
            .as_deref()
            .and_then(parse_date)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        snippet: snippet(&record.content, title_line),
        color: record.color,
    }
}

/// Returns the display title and, when it was taken from the content, the
/// index of the line it came from.
fn derive_title(record: &NoteRecord) -> (String, Option<usize>) {
    if let Some(title) = record.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        return (title.to_string(), None);
    }
    match record
        .content
        .split('\n')
        .enumerate()
        .find(|(_, line)| !line.trim().is_empty())
    {
        Some((index, line)) => (line.trim().to_string(), Some(index)),
        None => (UNTITLED.to_string(), None),
    }
}

fn snippet(content: &str, title_line: Option<usize>) -> String {
    if content.trim().is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let body: &[&str] = match title_line {
        // A note that is nothing but its title still shows that line.
        Some(index) if lines[index + 1..].iter().any(|l| !l.trim().is_empty()) => {
            let rest = &lines[index + 1..];
            let skip = rest.iter().take_while(|l| l.trim().is_empty()).count();
            &rest[skip..]
        }
        _ => &lines[..],
    };

    let text = body
        .iter()
        .take(SNIPPET_MAX_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    truncate(&text)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text.to_string();
    }
    let keep = SNIPPET_MAX_CHARS - ELLIPSIS.chars().count();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Accepts RFC 3339, naive ISO date-times (`T` or space separated, optional
/// fraction) and bare dates.
fn parse_date(timestamp: &str) -> Option<NaiveDate> {
    let ts = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
