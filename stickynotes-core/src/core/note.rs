use crate::NoteColor;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Position given to notes that have never been placed on screen.
pub const DEFAULT_POSITION: (i32, i32) = (100, 100);

/// Timestamp layout written on every save: local time with microseconds,
/// e.g. `2025-03-14T09:26:53.589793`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The persisted state of one sticky note.
///
/// Every field except `id` tolerates absence in the notes file so that
/// records written by older versions keep loading. A field holding `null`
/// or a value of the wrong type is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    #[serde(default, deserialize_with = "or_default")]
    pub id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
    #[serde(default = "default_x", deserialize_with = "x_or_default")]
    pub x: i32,
    #[serde(default = "default_y", deserialize_with = "y_or_default")]
    pub y: i32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub timestamp: Option<String>,
}

fn default_x() -> i32 {
    DEFAULT_POSITION.0
}

fn default_y() -> i32 {
    DEFAULT_POSITION.1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Decodes a `T`, yielding `None` for `null` or anything else that is not a `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Value(value) => Some(value),
        Lenient::Other(_) => None,
    })
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn x_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(lenient(deserializer)?.unwrap_or_else(default_x))
}

fn y_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(lenient(deserializer)?.unwrap_or_else(default_y))
}

impl NoteRecord {
    /// Creates an empty yellow note with a fresh id at `position`.
    pub fn new(position: (i32, i32)) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            content: String::new(),
            color: NoteColor::default(),
            x: position.0,
            y: position.1,
            timestamp: None,
        }
    }

    /// Stamps the record with the current local time.
    pub fn touch(&mut self) {
        self.timestamp = Some(now_timestamp());
    }
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_has_unique_id() {
        let a = NoteRecord::new(DEFAULT_POSITION);
        let b = NoteRecord::new(DEFAULT_POSITION);
        assert_ne!(a.id, b.id);
        assert_eq!(a.color, NoteColor::Yellow);
        assert_eq!((a.x, a.y), (100, 100));
        assert!(a.timestamp.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: NoteRecord = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();
        assert_eq!(record.id, "n1");
        assert_eq!(record.title, None);
        assert_eq!(record.content, "");
        assert_eq!(record.color, NoteColor::Yellow);
        assert_eq!((record.x, record.y), DEFAULT_POSITION);
        assert_eq!(record.timestamp, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record: NoteRecord =
            serde_json::from_str(r#"{"id": "n1", "pinned": true, "color": "blue"}"#).unwrap();
        assert_eq!(record.color, NoteColor::Blue);
    }

    #[test]
    fn test_null_and_mistyped_fields_take_defaults() {
        let record: NoteRecord = serde_json::from_str(
            r#"{"id": "n1", "title": 7, "content": null, "x": null, "y": "left",
                "color": null, "timestamp": null}"#,
        )
        .unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.content, "");
        assert_eq!((record.x, record.y), DEFAULT_POSITION);
        assert_eq!(record.color, NoteColor::Yellow);
        assert_eq!(record.timestamp, None);

        let record: NoteRecord =
            serde_json::from_str(r#"{"id": "n2", "content": "kept", "x": 40, "y": null}"#)
                .unwrap();
        assert_eq!(record.content, "kept");
        assert_eq!((record.x, record.y), (40, 100));
    }

    #[test]
    fn test_absent_title_is_not_written() {
        let record = NoteRecord::new(DEFAULT_POSITION);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("title"));
        assert!(json.contains("\"color\":\"yellow\""));
    }

    #[test]
    fn test_touch_sets_parseable_timestamp() {
        let mut record = NoteRecord::new(DEFAULT_POSITION);
        record.touch();
        let ts = record.timestamp.unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}
