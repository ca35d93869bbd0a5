//! Metadata and content extraction
//!
//! Reads the song title, the artist and the chord/lyric markup from the host
//! page. The page is reached through [`HostDocument`] so the same code runs
//! against the live DOM and against captured fixture pages.

pub mod fixture;
pub mod selector;

pub use fixture::FixtureDocument;
pub use selector::{AttrMatch, Selector, SelectorError};

use crate::config::ReflowConfig;
use crate::models::SongData;
use crate::segment::segment;

/// Read access to a rendered page
///
/// Both lookups return the first element matching a CSS selector.
pub trait HostDocument {
    /// Concatenated text of the element and its descendants
    fn text_content(&self, selector: &str) -> Option<String>;

    /// Markup between the element's start and end tags
    fn inner_markup(&self, selector: &str) -> Option<String>;
}

/// Build `SongData` from the page, or `None` if the page carries no chord
/// markup block.
///
/// A missing title or artist falls back to `config.placeholder`.
pub fn extract<D: HostDocument + ?Sized>(doc: &D, config: &ReflowConfig) -> Option<SongData> {
    let Some(markup) = doc.inner_markup(&config.markup_selector) else {
        log::debug!("no element matches '{}'", config.markup_selector);
        return None;
    };

    let title = doc
        .text_content(&config.title_selector)
        .map(|text| clean_title(&text, &config.title_suffixes))
        .unwrap_or_else(|| config.placeholder.clone());

    let artist = doc
        .text_content(&config.artist_selector)
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|| config.placeholder.clone());

    let sections = segment(&markup);
    log::debug!(
        "extracted '{}' by '{}': {} sections from {} bytes of markup",
        title,
        artist,
        sections.len(),
        markup.len()
    );

    Some(SongData { title, artist, sections })
}

/// Drop the first occurrence of each page-type label from a heading, then trim
///
/// `"Wonderwall Chords"` becomes `"Wonderwall"`.
pub fn clean_title<S: AsRef<str>>(heading: &str, suffixes: &[S]) -> String {
    let mut title = heading.to_string();
    for suffix in suffixes {
        let suffix = suffix.as_ref();
        if !suffix.is_empty() {
            title = title.replacen(suffix, "", 1);
        }
    }
    title.trim().to_string()
}
