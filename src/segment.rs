//! Markup segmentation
//!
//! Splits the chord/lyric markup of a song into sections. Sections are
//! introduced by short bracketed labels such as `[Verse]` or `{Chorus}`; pages
//! without labels are split on blank lines instead.
//!
//! The markup is HTML (chords are inline `<span>` elements), so the header
//! pattern only admits letters, digits and spaces between the delimiters. A
//! bracket pair that encloses any tag character is never a header.

use crate::models::Section;
use once_cell::sync::Lazy;
use regex::Regex;

/// `[Label]` or `{Label}`; the two delimiter kinds may be mixed
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[{]([A-Za-z0-9 ]+)[\]}]").unwrap());

/// A newline, any whitespace (including further newlines), a newline
static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split markup into sections in document order
///
/// Always returns at least one section.
pub fn segment(markup: &str) -> Vec<Section> {
    let headers: Vec<_> = HEADER.captures_iter(markup).collect();

    if headers.is_empty() {
        return segment_by_blank_lines(markup);
    }

    let mut sections = Vec::with_capacity(headers.len() + 1);

    // Chord definitions and the like often precede the first label
    let first_start = headers[0].get(0).map_or(0, |m| m.start());
    let intro = markup[..first_start].trim();
    if !intro.is_empty() {
        sections.push(Section::untitled(intro));
    }

    for (i, caps) in headers.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(markup.len(), |m| m.start());

        sections.push(Section::new(label.as_str(), markup[whole.end()..end].trim()));
    }

    sections
}

fn segment_by_blank_lines(markup: &str) -> Vec<Section> {
    let sections: Vec<Section> = BLANK_LINE
        .split(markup)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(Section::untitled)
        .collect();

    if sections.is_empty() {
        vec![Section::untitled(markup.trim())]
    } else {
        sections
    }
}

/// Reassemble sections into markup, rewrapping titles in square brackets
///
/// The result matches the segmented input up to whitespace and delimiter kind.
pub fn rejoin(sections: &[Section]) -> String {
    let mut parts = Vec::with_capacity(sections.len() * 2);
    for section in sections {
        if section.has_title() {
            parts.push(format!("[{}]", section.title));
        }
        if !section.content.is_empty() {
            parts.push(section.content.clone());
        }
    }
    parts.join("\n")
}
