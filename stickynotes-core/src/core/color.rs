//! The fixed note colour palette.
//!
//! Colours serialize as lower-case names (`"yellow"`, `"pink"`, …). Decoding
//! is lenient: any unknown name, non-string value or missing field becomes
//! [`NoteColor::Yellow`], so a hand-edited or older notes file never fails to
//! load because of a colour.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Background, border and text colours used to paint a note window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

/// One of the six colours a sticky note can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Pink,
    Blue,
    Green,
    Orange,
    Purple,
}

impl NoteColor {
    /// Every colour, in the order the colour menu lists them.
    pub const ALL: [NoteColor; 6] = [
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Orange,
        NoteColor::Purple,
    ];

    /// The lower-case name used in the notes file and as the swatch CSS class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }

    /// Parses `value`, falling back to yellow for anything outside the palette.
    #[must_use]
    pub fn coerce(value: &str) -> Self {
        match value.parse() {
            Ok(color) => color,
            Err(()) => {
                log::warn!("invalid note color {value:?}, defaulting to yellow");
                Self::Yellow
            }
        }
    }

    /// Decodes a colour-menu action parameter such as `'pink'`.
    ///
    /// Menu parameters may arrive wrapped in single or double quotes; those
    /// are stripped before coercion.
    #[must_use]
    pub fn from_menu_value(value: &str) -> Self {
        Self::coerce(value.trim().trim_matches(|c| c == '\'' || c == '"'))
    }

    /// Colours for the note window itself.
    #[must_use]
    pub fn style(self) -> ColorStyle {
        match self {
            Self::Yellow => ColorStyle { background: "#ffeb3b", border: "#ffd600", text: "#3e3500" },
            Self::Pink => ColorStyle { background: "#f8d7da", border: "#f5c6cb", text: "#721c24" },
            Self::Blue => ColorStyle { background: "#cce5ff", border: "#74b9ff", text: "#004085" },
            Self::Green => ColorStyle { background: "#d1ecf1", border: "#00b894", text: "#0c5460" },
            Self::Orange => ColorStyle { background: "#ffe8cc", border: "#fdcb6e", text: "#663c00" },
            Self::Purple => ColorStyle { background: "#e2d5f1", border: "#a29bfe", text: "#4a235a" },
        }
    }

    /// Fill colour of the small round swatch on a preview card.
    #[must_use]
    pub fn swatch(self) -> &'static str {
        self.style().background
    }
}

impl FromStr for NoteColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NoteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Self::coerce(&name),
            Raw::Other(_) => {
                log::warn!("non-string note color, defaulting to yellow");
                Self::Yellow
            }
        })
    }
}
