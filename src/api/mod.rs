//! WASM API
//!
//! - `helpers`: serialization, config loading and logger setup
//! - `core`: the exported functions

pub mod core;
pub mod helpers;

pub use self::core::{build_view, run_reflow, segment_markup};
