//! Chord page reflow content script
//!
//! Runs inside a chords page, waits for the host's client-side rendering to
//! finish, pulls out the title, artist and chord/lyric markup, and replaces
//! the page with a multi-column reading view. A button switches back to the
//! original page.
//!
//! The pipeline is written against small traits (`extract::HostDocument`,
//! `wait::Scheduler`, `wait::PageStage`, `view::ViewSurface`) so everything
//! but the `dom` bindings runs and tests natively.

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod models;
pub mod segment;
pub mod view;
pub mod wait;

// Re-export commonly used types
pub use config::ReflowConfig;
pub use error::ReflowError;
pub use extract::{extract, HostDocument};
pub use models::{Section, SongData};
pub use segment::segment;

use wasm_bindgen::prelude::*;

// Runs when the content script's module is instantiated
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = ReflowConfig::default();
    api::helpers::init_logging(config.log_level);

    if let Err(err) = dom::run(config) {
        log::warn!("reflow not started: {}", err);
    }
}
