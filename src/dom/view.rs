//! Installing the reading view into the page

use super::{body, create_html_element, ensure_styles};
use crate::config::ReflowConfig;
use crate::error::ReflowError;
use crate::models::SongData;
use crate::view::{self, ViewSurface, ViewSwitcher, ROOT_CLASS, TOGGLE_CLASS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// The host's `<body>` and the generated root
pub struct BrowserSurface {
    original: HtmlElement,
    generated: HtmlElement,
}

impl BrowserSurface {
    pub fn new(original: HtmlElement, generated: HtmlElement) -> Self {
        Self { original, generated }
    }
}

fn set_displayed(element: &HtmlElement, visible: bool) {
    let style = element.style();
    let result = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(err) = result {
        log::warn!("could not change visibility: {}", ReflowError::dom(err));
    }
}

impl ViewSurface for BrowserSurface {
    fn set_original_visible(&self, visible: bool) {
        set_displayed(&self.original, visible);
    }

    fn set_generated_visible(&self, visible: bool) {
        set_displayed(&self.generated, visible);
    }
}

pub type SharedSwitcher = Rc<RefCell<ViewSwitcher<BrowserSurface>>>;

/// Build the view for `song`, attach it next to `<body>` and hide the page
///
/// The toggle button's click handler shares the returned switcher and lives
/// for the rest of the page's lifetime.
pub fn install_view(
    document: &Document,
    config: &ReflowConfig,
    song: &SongData,
) -> Result<SharedSwitcher, ReflowError> {
    ensure_styles(document, config)?;

    let root = create_html_element(document, "div")?;
    root.set_id(&config.ids.root);
    root.set_class_name(ROOT_CLASS);
    root.set_inner_html(&view::build(song, config)?);

    let switcher = Rc::new(RefCell::new(ViewSwitcher::new(BrowserSurface::new(
        body(document)?,
        root.clone(),
    ))));

    let button = root
        .query_selector(&format!(".{}", TOGGLE_CLASS))
        .map_err(ReflowError::dom)?
        .ok_or(ReflowError::MissingElement("toggle button"))?;
    let handle = Rc::clone(&switcher);
    let on_click = Closure::wrap(Box::new(move || {
        handle.borrow_mut().toggle();
    }) as Box<dyn FnMut()>);
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(ReflowError::dom)?;
    on_click.forget();

    // Appended to <html>, not <body>, since the body gets hidden
    let html = document
        .document_element()
        .ok_or(ReflowError::MissingElement("html"))?;
    html.append_child(&root).map_err(ReflowError::dom)?;

    switcher.borrow_mut().activate();
    log::debug!("view installed with {} sections", song.sections.len());
    Ok(switcher)
}
