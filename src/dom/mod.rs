//! Browser bindings
//!
//! `web-sys` implementations of the traits the pipeline is written against,
//! and the entry that wires them together for one page.

pub mod document;
pub mod stage;
pub mod view;

pub use document::BrowserDocument;
pub use stage::{BrowserStage, TimeoutScheduler};
pub use view::{install_view, BrowserSurface, SharedSwitcher};

use crate::config::ReflowConfig;
use crate::error::ReflowError;
use crate::extract::extract;
use crate::wait::{Outcome, RenderWait};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

pub fn window() -> Result<Window, ReflowError> {
    web_sys::window().ok_or(ReflowError::NoWindow)
}

pub(crate) fn body(document: &Document) -> Result<HtmlElement, ReflowError> {
    document.body().ok_or(ReflowError::MissingElement("body"))
}

pub(crate) fn create_html_element(document: &Document, tag: &str) -> Result<HtmlElement, ReflowError> {
    document
        .create_element(tag)
        .map_err(ReflowError::dom)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ReflowError::Dom(format!("<{}> is not an HTMLElement", tag)))
}

/// Add the stylesheet to `<head>` unless it is already there
pub(crate) fn ensure_styles(document: &Document, config: &ReflowConfig) -> Result<(), ReflowError> {
    if document.get_element_by_id(&config.ids.styles).is_some() {
        return Ok(());
    }
    let style = document.create_element("style").map_err(ReflowError::dom)?;
    style.set_id(&config.ids.styles);
    style.set_text_content(Some(&crate::view::stylesheet(config)?));
    document
        .head()
        .ok_or(ReflowError::MissingElement("head"))?
        .append_child(&style)
        .map_err(ReflowError::dom)?;
    Ok(())
}

/// Extraction step run at the end of the render wait
pub fn extract_and_install(document: &Document, config: &ReflowConfig) -> Result<Outcome, ReflowError> {
    let host = BrowserDocument::new(document.clone());
    let Some(song) = extract(&host, config) else {
        return Ok(Outcome::NotApplicable);
    };
    install_view(document, config, &song)?;
    Ok(Outcome::Installed)
}

/// Set on `<html>` from the moment a run is armed until its extraction step
pub const RUN_MARKER: &str = "data-reflow-run";

/// Whether another run is pending or has left its overlay or view in the page
pub fn is_active(document: &Document, config: &ReflowConfig) -> bool {
    let armed = document
        .document_element()
        .is_some_and(|html| html.has_attribute(RUN_MARKER));
    armed
        || [&config.ids.overlay, &config.ids.root]
            .into_iter()
            .any(|id| document.get_element_by_id(id).is_some())
}

fn set_run_marker(document: &Document, armed: bool) {
    let Some(html) = document.document_element() else {
        return;
    };
    let result = if armed {
        html.set_attribute(RUN_MARKER, "")
    } else {
        html.remove_attribute(RUN_MARKER)
    };
    if let Err(err) = result {
        log::warn!("could not update run marker: {}", ReflowError::dom(err));
    }
}

/// Start the render wait on the current page if its address qualifies
///
/// Returns as soon as the first timer is armed. A page with a pending run, or
/// with the overlay or view of an earlier one, is left alone.
pub fn run(config: ReflowConfig) -> Result<(), ReflowError> {
    let window = window()?;
    let href = window.location().href().map_err(ReflowError::dom)?;
    if !config.applies_to(&href) {
        log::debug!("'{}' is not a chords page", href);
        return Ok(());
    }

    let document = window.document().ok_or(ReflowError::NoDocument)?;
    if is_active(&document, &config) {
        log::info!("reflow already running on {}", href);
        return Ok(());
    }
    let config = Rc::new(config);
    log::info!("reflowing {}", href);

    let controller = RenderWait::new(
        TimeoutScheduler::new(window),
        BrowserStage::new(document.clone(), Rc::clone(&config)),
        config.readiness.clone(),
        config.timings,
    );
    set_run_marker(&document, true);
    controller.start(Box::new(move || {
        set_run_marker(&document, false);
        extract_and_install(&document, &config)
    }));
    Ok(())
}
