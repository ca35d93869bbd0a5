//! Song data extracted from a chords page
//!
//! `SongData` is built once per page load and handed to the view builder;
//! nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

/// One titled or untitled block of chord/lyric markup
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Section {
    /// Inner text of the header (`"Verse"` for `[Verse]`), empty when untitled
    pub title: String,

    /// Markup fragment; inline chord elements are kept verbatim
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Section without a header (preamble or blank-line block)
    pub fn untitled(content: impl Into<String>) -> Self {
        Self::new(String::new(), content)
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Everything the view builder needs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SongData {
    pub title: String,
    pub artist: String,
    /// Document order
    pub sections: Vec<Section>,
}
