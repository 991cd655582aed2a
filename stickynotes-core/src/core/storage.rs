//! The JSON notes file.
//!
//! The whole store lives in one JSON object mapping note id to
//! [`NoteRecord`]. It is read once when a [`NoteStore`] opens and rewritten
//! in full after every mutation; there is no journal, no atomic rename and
//! no locking.

use crate::{NoteRecord, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Note records keyed by id, in file order.
pub type NoteMap = IndexMap<String, NoteRecord>;

/// Reads the notes file at `path`.
///
/// A missing file is an empty store. Entries that fail to decode are skipped
/// with a warning; the map key always wins over a record's own `id` field.
///
/// # Errors
///
/// Returns [`crate::StickyNotesError::Io`] if the file exists but cannot be
/// read, or [`crate::StickyNotesError::Json`] if it is not a JSON object.
pub fn read_notes<P: AsRef<Path>>(path: P) -> Result<NoteMap> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(NoteMap::new());
    }

    let text = fs::read_to_string(path)?;
    let raw: IndexMap<String, serde_json::Value> = serde_json::from_str(&text)?;

    let mut notes = NoteMap::with_capacity(raw.len());
    for (id, value) in raw {
        let mut record: NoteRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("skipping unreadable note {id}: {e}");
                continue;
            }
        };
        if record.id != id {
            if !record.id.is_empty() {
                log::warn!("note {id} carries mismatched id {}", record.id);
            }
            record.id = id.clone();
        }
        notes.insert(id, record);
    }
    Ok(notes)
}

/// Reads the notes file, returning an empty store on any failure.
pub fn load_notes<P: AsRef<Path>>(path: P) -> NoteMap {
    match read_notes(&path) {
        Ok(notes) => notes,
        Err(e) => {
            log::warn!("failed to load notes from {:?}: {e}", path.as_ref());
            NoteMap::new()
        }
    }
}

/// Overwrites the notes file with `notes`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`crate::StickyNotesError::Io`] if the directory or file cannot be
/// written.
pub fn write_notes<P: AsRef<Path>>(path: P, notes: &NoteMap) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(notes)?;
    fs::write(path, json)?;
    Ok(())
}

/// In-memory note records mirrored to a single JSON file.
///
/// The store is owned by the session and handed around explicitly; nothing
/// else writes the file.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: NoteMap,
}

impl NoteStore {
    /// Opens the store at `path`, loading whatever is there.
    ///
    /// Never fails: an unreadable or corrupt file yields an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let notes = load_notes(&path);
        log::info!("loaded {} notes from {:?}", notes.len(), path);
        Self { path, notes }
    }

    /// Re-reads the file, replacing the in-memory records.
    pub fn load(&mut self) -> &NoteMap {
        self.notes = load_notes(&self.path);
        &self.notes
    }

    /// Writes every record to disk.
    ///
    /// Failures are logged and otherwise ignored; the in-memory records stay
    /// authoritative until the next successful write.
    pub fn save(&self) {
        match write_notes(&self.path, &self.notes) {
            Ok(()) => log::debug!("saved {} notes to {:?}", self.notes.len(), self.path),
            Err(e) => log::error!("failed to save notes to {:?}: {e}", self.path),
        }
    }

    /// Inserts or replaces `record` by id, then saves.
    pub fn upsert(&mut self, record: NoteRecord) {
        self.notes.insert(record.id.clone(), record);
        self.save();
    }

    /// Deletes `id` and saves. Absent ids are a no-op and do not touch the file.
    pub fn remove(&mut self, id: &str) -> Option<NoteRecord> {
        let removed = self.notes.shift_remove(id);
        if removed.is_some() {
            self.save();
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&NoteRecord> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.notes.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.notes.keys().map(String::as_str)
    }

    pub fn notes(&self) -> &NoteMap {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteColor;
    use tempfile::TempDir;

    fn record(id: &str, content: &str) -> NoteRecord {
        NoteRecord {
            id: id.to_string(),
            title: None,
            content: content.to_string(),
            color: NoteColor::Yellow,
            x: 100,
            y: 100,
            timestamp: None,
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "not json at all").unwrap();

        let store = NoteStore::open(&path);
        assert!(store.is_empty());
        assert!(read_notes(&path).is_err());
    }

    #[test]
    fn test_non_object_document_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_notes(&path).is_empty());
    }

    #[test]
    fn test_upsert_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);

        let full = NoteRecord {
            id: "full".to_string(),
            title: Some("Groceries".to_string()),
            content: "milk\neggs".to_string(),
            color: NoteColor::Purple,
            x: -20,
            y: 640,
            timestamp: Some("2025-03-14T09:26:53.589793".to_string()),
        };
        let bare = record("bare", "");

        store.upsert(full.clone());
        store.upsert(bare.clone());

        let loaded = load_notes(&path);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("full"), Some(&full));
        assert_eq!(loaded.get("bare"), Some(&bare));
    }

    #[test]
    fn test_upsert_replaces_existing_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);

        store.upsert(record("a", "first"));
        store.upsert(record("a", "second"));

        let loaded = load_notes(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["a"].content, "second");
    }

    #[test]
    fn test_remove_then_load_drops_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);
        store.upsert(record("a", "keep"));
        store.upsert(record("b", "drop"));

        assert!(store.remove("b").is_some());

        let loaded = load_notes(&path);
        assert!(loaded.contains_key("a"));
        assert!(!loaded.contains_key("b"));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);

        assert!(store.remove("ghost").is_none());
        assert!(!path.exists(), "removing an absent id must not write the file");

        store.upsert(record("a", "x"));
        let before = fs::read_to_string(&path).unwrap();
        assert!(store.remove("ghost").is_none());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_invalid_color_loads_as_yellow() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{"n1": {"id": "n1", "content": "x", "color": "chartreuse"}}"#).unwrap();

        let store = NoteStore::open(&path);
        assert_eq!(store.get("n1").unwrap().color, NoteColor::Yellow);

        // Saving writes the coerced value back.
        store.save();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"yellow\""));
        assert!(!text.contains("chartreuse"));
    }

    #[test]
    fn test_bad_entry_is_skipped_others_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"{"good": {"content": "hello"}, "odd": {"content": 12}, "bad": "text", "worse": [1]}"#,
        )
        .unwrap();

        let notes = load_notes(&path);
        let ids: Vec<&str> = notes.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["good", "odd"]);
        assert_eq!(notes["good"].content, "hello");
        assert_eq!(notes["odd"].content, "");
    }

    #[test]
    fn test_null_fields_do_not_lose_note() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(
            &path,
            r#"{"a": {"id": "a", "content": "keep me", "x": null, "y": null},
                "b": {"id": "b", "content": null, "x": 5, "y": 6}}"#,
        )
        .unwrap();

        let mut store = NoteStore::open(&path);
        assert_eq!(store.len(), 2);
        let a = store.get("a").unwrap();
        assert_eq!(a.content, "keep me");
        assert_eq!((a.x, a.y), (100, 100));
        let b = store.get("b").unwrap();
        assert_eq!(b.content, "");
        assert_eq!((b.x, b.y), (5, 6));

        // A later write must not drop either record.
        store.upsert(record("c", "new"));
        let reloaded = load_notes(&path);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded["a"].content, "keep me");
        assert!(reloaded.contains_key("b"));
    }

    #[test]
    fn test_map_key_wins_over_record_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{"key": {"id": "other", "content": "x"}}"#).unwrap();

        let notes = load_notes(&path);
        assert_eq!(notes["key"].id, "key");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("notes.json");
        let mut store = NoteStore::open(&path);
        store.upsert(record("a", "x"));
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        // The target path is an existing directory, so the write fails.
        let mut store = NoteStore::open(dir.path());
        store.upsert(record("a", "x"));
        assert!(store.contains("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);
        for id in ["c", "a", "b"] {
            store.upsert(record(id, id));
        }

        let reopened = NoteStore::open(&path);
        let ids: Vec<&str> = reopened.ids().collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_written_document_is_indented() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = NoteStore::open(&path);
        store.upsert(record("a", "x"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"a\": {"));
    }
}
