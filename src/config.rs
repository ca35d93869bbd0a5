//! Runtime configuration
//!
//! Every tunable constant of the content script lives here. `Default` carries
//! the values tuned against the host site; JavaScript callers may override any
//! subset through `runReflow`.

use serde::{Deserialize, Serialize};

/// How the controller decides the host page has settled before the pulse
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Readiness {
    /// Wait `settle_delay_ms` once
    Fixed,
    /// Check for the markup container every `interval_ms`, giving up after
    /// `max_attempts` checks
    #[serde(rename_all = "camelCase")]
    Poll { interval_ms: u32, max_attempts: u32 },
}

impl Default for Readiness {
    fn default() -> Self {
        Readiness::Fixed
    }
}

/// Log verbosity, mirrored onto `log::Level`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Element ids owned by the generated view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub root: String,
    pub styles: String,
    pub overlay: String,
    pub zoom_wrapper: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            root: "reflow-root".to_string(),
            styles: "reflow-styles".to_string(),
            overlay: "reflow-loading-overlay".to_string(),
            zoom_wrapper: "reflow-zoom-wrapper".to_string(),
        }
    }
}

/// Timings of the render-wait sequence, in milliseconds
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WaitTimings {
    /// Delay after load before the pulse (lets the host framework paint)
    pub settle_delay_ms: u32,
    /// How long the page is held shrunk
    pub pulse_delay_ms: u32,
    /// Overlay fade duration; must match the CSS transition
    pub fade_delay_ms: u32,
    /// Zoom factor applied to the wrapped page during the pulse
    pub zoom_scale: f64,
}

impl Default for WaitTimings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            pulse_delay_ms: 500,
            fade_delay_ms: 400,
            zoom_scale: 0.1,
        }
    }
}

/// Complete configuration of one reflow run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReflowConfig {
    /// Substring of the page address that marks a chords page
    pub activation_marker: String,
    /// When false, `runReflow` proceeds on any address
    pub check_activation: bool,
    /// Selector of the song title heading
    pub title_selector: String,
    /// Selector of the artist profile link
    pub artist_selector: String,
    /// Selector of the pre-formatted chord/lyric block
    pub markup_selector: String,
    /// Labels stripped from the heading text, in order
    pub title_suffixes: Vec<String>,
    /// Substitute for a missing title or artist
    pub placeholder: String,
    /// Label of the view toggle button
    pub toggle_label: String,
    /// Text shown on the loading overlay
    pub loading_text: String,
    pub readiness: Readiness,
    pub timings: WaitTimings,
    pub ids: ElementIds,
    pub log_level: LogLevel,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            activation_marker: "-chords-".to_string(),
            check_activation: true,
            title_selector: "h1".to_string(),
            artist_selector: r#"a[href*="/artist/"]"#.to_string(),
            markup_selector: "pre.xNWlr".to_string(),
            title_suffixes: vec!["Chords".to_string(), "Tab".to_string()],
            placeholder: "Unknown".to_string(),
            toggle_label: "Original".to_string(),
            loading_text: "Simplifying layout".to_string(),
            readiness: Readiness::default(),
            timings: WaitTimings::default(),
            ids: ElementIds::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ReflowConfig {
    /// Whether the page at `url` should be processed
    pub fn applies_to(&self, url: &str) -> bool {
        !self.check_activation || url.contains(&self.activation_marker)
    }
}
