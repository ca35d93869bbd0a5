//! Data extracted from the host page

pub mod song;

pub use song::{Section, SongData};
