//! Generated reading view
//!
//! The view is rendered to an HTML string from mustache templates, then
//! installed into the page by `dom::install_view`. Keeping the rendering pure
//! lets it be checked without a browser.
//!
//! Song title, artist and section titles are escaped. Section content is the
//! page's own markup and is inserted verbatim so chord spans keep their
//! attributes (the stylesheet highlights `span[data-name]`).

pub mod switcher;

pub use switcher::{ViewState, ViewSurface, ViewSwitcher};

use crate::config::ReflowConfig;
use crate::error::ReflowError;
use crate::models::SongData;
use serde::Serialize;

/// Class of the root container
pub const ROOT_CLASS: &str = "reflow-container";
/// Class of the view toggle button
pub const TOGGLE_CLASS: &str = "reflow-toggle-btn";
/// Class added to the overlay to start its fade transition
pub const FADE_CLASS: &str = "fade-out";

const VIEW_TEMPLATE: &str = include_str!("templates/view.html.mustache");
const OVERLAY_TEMPLATE: &str = include_str!("templates/overlay.html.mustache");
const STYLES_TEMPLATE: &str = include_str!("templates/styles.css.mustache");

#[derive(Serialize)]
struct SectionContext<'a> {
    title: &'a str,
    has_title: bool,
    content: &'a str,
}

#[derive(Serialize)]
struct ViewContext<'a> {
    title: &'a str,
    artist: &'a str,
    toggle_label: &'a str,
    sections: Vec<SectionContext<'a>>,
}

#[derive(Serialize)]
struct OverlayContext<'a> {
    loading_text: &'a str,
}

#[derive(Serialize)]
struct StylesContext<'a> {
    root_id: &'a str,
    overlay_id: &'a str,
    fade_ms: u32,
}

fn render<T: Serialize>(template: &str, context: &T) -> Result<String, ReflowError> {
    let template = mustache::compile_str(template)?;
    Ok(template.render_to_string(context)?)
}

/// Inner HTML of the view root: header, toggle button and one block per
/// section inside the column container
pub fn build(song: &SongData, config: &ReflowConfig) -> Result<String, ReflowError> {
    let context = ViewContext {
        title: &song.title,
        artist: &song.artist,
        toggle_label: &config.toggle_label,
        sections: song
            .sections
            .iter()
            .map(|section| SectionContext {
                title: &section.title,
                has_title: section.has_title(),
                content: &section.content,
            })
            .collect(),
    };
    render(VIEW_TEMPLATE, &context)
}

/// Inner HTML of the loading overlay
pub fn overlay_html(config: &ReflowConfig) -> Result<String, ReflowError> {
    render(
        OVERLAY_TEMPLATE,
        &OverlayContext { loading_text: &config.loading_text },
    )
}

/// Stylesheet for the view and the overlay, scoped under their element ids
pub fn stylesheet(config: &ReflowConfig) -> Result<String, ReflowError> {
    render(
        STYLES_TEMPLATE,
        &StylesContext {
            root_id: &config.ids.root,
            overlay_id: &config.ids.overlay,
            fade_ms: config.timings.fade_delay_ms,
        },
    )
}
