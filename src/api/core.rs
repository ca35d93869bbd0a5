//! JavaScript-facing functions
//!
//! The content script normally runs through the start hook in `lib.rs`.
//! These exports let a page or a test harness drive the same pipeline
//! explicitly.

use super::helpers::{config_from_js, deserialize, init_logging, serialize};
use crate::dom;
use crate::models::SongData;
use crate::segment::segment;
use crate::view;
use crate::{reflow_error, reflow_log};
use wasm_bindgen::prelude::*;

/// Run the reflow on the current page with optional config overrides
///
/// # Parameters
/// - `config`: partial `ReflowConfig` (camelCase keys), or `undefined`
#[wasm_bindgen(js_name = runReflow)]
pub fn run_reflow(config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config)?;
    init_logging(config.log_level);
    reflow_log!("runReflow called");
    dom::run(config).map_err(|e| {
        reflow_error!("runReflow failed: {}", e);
        e.into()
    })
}

/// Split chord/lyric markup into sections
///
/// # Returns
/// Array of `{ title, content }` in document order
#[wasm_bindgen(js_name = segmentMarkup)]
pub fn segment_markup(markup: &str) -> Result<JsValue, JsValue> {
    let sections = segment(markup);
    reflow_log!("segmentMarkup: {} sections", sections.len());
    serialize(&sections, "Failed to serialize sections")
}

/// Render the inner HTML of the reading view for `{ title, artist, sections }`
#[wasm_bindgen(js_name = buildView)]
pub fn build_view(song: JsValue, config: JsValue) -> Result<String, JsValue> {
    let song: SongData = deserialize(song, "Invalid song data")?;
    let config = config_from_js(config)?;
    let html = view::build(&song, &config)?;
    reflow_log!("buildView: {} sections, {} bytes", song.sections.len(), html.len());
    Ok(html)
}
