//! Browser side of the render-wait controller

use super::{body, create_html_element, ensure_styles};
use crate::config::ReflowConfig;
use crate::error::ReflowError;
use crate::view::{self, FADE_CLASS};
use crate::wait::{PageStage, Scheduler};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Node, Window};

/// `setTimeout` with a one-shot closure
pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref::<js_sys::Function>(), timeout)
        {
            log::warn!("setTimeout failed: {}", ReflowError::dom(err));
        }
    }
}

/// Overlay, zoom wrapper and stylesheet on the live page
pub struct BrowserStage {
    document: Document,
    config: Rc<ReflowConfig>,
}

impl BrowserStage {
    pub fn new(document: Document, config: Rc<ReflowConfig>) -> Self {
        Self { document, config }
    }

    fn by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }
}

impl PageStage for BrowserStage {
    fn is_loaded(&self) -> bool {
        self.document.ready_state() != "loading"
    }

    fn on_loaded(&self, callback: Box<dyn FnOnce()>) {
        let listener = Closure::once_into_js(move || callback());
        if let Err(err) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
        {
            log::warn!("could not listen for DOMContentLoaded: {}", ReflowError::dom(err));
        }
    }

    fn content_ready(&self) -> bool {
        matches!(
            self.document.query_selector(&self.config.markup_selector),
            Ok(Some(_))
        )
    }

    fn install_styles(&self) -> Result<(), ReflowError> {
        ensure_styles(&self.document, &self.config)
    }

    fn show_overlay(&self) -> Result<(), ReflowError> {
        let body = body(&self.document)?;
        let overlay = self.document.create_element("div").map_err(ReflowError::dom)?;
        overlay.set_id(&self.config.ids.overlay);
        overlay.set_inner_html(&view::overlay_html(&self.config)?);
        body.append_child(&overlay).map_err(ReflowError::dom)?;
        Ok(())
    }

    fn shrink_content(&self, scale: f64) -> Result<(), ReflowError> {
        let body = body(&self.document)?;
        let overlay = self.by_id(&self.config.ids.overlay);
        let overlay_node = overlay.as_ref().map(AsRef::<Node>::as_ref);

        let wrapper = create_html_element(&self.document, "div")?;
        wrapper.set_id(&self.config.ids.zoom_wrapper);
        // Attached before any child moves; restore_content looks it up by id
        body.insert_before(&wrapper, overlay_node)
            .map_err(ReflowError::dom)?;

        // Everything in front of the wrapper; the overlay itself stays put
        let wrapper_node: &Node = wrapper.as_ref();
        while let Some(child) = body.first_child() {
            if child.is_same_node(Some(wrapper_node)) {
                break;
            }
            wrapper.append_child(&child).map_err(ReflowError::dom)?;
        }

        let style = wrapper.style();
        style
            .set_property("zoom", &scale.to_string())
            .map_err(ReflowError::dom)?;
        style
            .set_property("transform-origin", "top left")
            .map_err(ReflowError::dom)?;
        Ok(())
    }

    fn restore_content(&self) -> Result<(), ReflowError> {
        let Some(wrapper) = self.by_id(&self.config.ids.zoom_wrapper) else {
            return Ok(());
        };
        let parent = wrapper
            .parent_node()
            .ok_or(ReflowError::MissingElement("zoom wrapper parent"))?;

        while let Some(child) = wrapper.first_child() {
            parent
                .insert_before(&child, Some(&wrapper))
                .map_err(ReflowError::dom)?;
        }
        wrapper.remove();
        Ok(())
    }

    fn fade_overlay(&self) {
        if let Some(overlay) = self.by_id(&self.config.ids.overlay) {
            if let Err(err) = overlay.class_list().add_1(FADE_CLASS) {
                log::warn!("could not fade overlay: {}", ReflowError::dom(err));
            }
        }
    }

    fn remove_overlay(&self) {
        if let Some(overlay) = self.by_id(&self.config.ids.overlay) {
            overlay.remove();
        }
    }
}
