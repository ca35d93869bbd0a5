//! Error types for the reflow pipeline
//!
//! Nothing here is surfaced to the user. Errors are logged by the render-wait
//! controller and the page is left as it was.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser layer and the view renderer
#[derive(Debug, Error)]
pub enum ReflowError {
    /// No global `window` (not running in a browser page)
    #[error("no window available")]
    NoWindow,

    /// The window has no document
    #[error("window has no document")]
    NoDocument,

    /// The document has no body (or head) to attach to
    #[error("document has no {0} element")]
    MissingElement(&'static str),

    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// View template failed to compile or render
    #[error("view template failed: {0}")]
    Template(#[from] mustache::Error),

    /// Configuration passed from JavaScript could not be read
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReflowError {
    /// Wrap a thrown JS value, keeping its string form when it has one
    pub fn dom(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        ReflowError::Dom(text)
    }
}

impl From<ReflowError> for JsValue {
    fn from(err: ReflowError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
