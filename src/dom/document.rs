//! Live DOM as a `HostDocument`

use crate::error::ReflowError;
use crate::extract::HostDocument;
use web_sys::{Document, Element};

pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("selector '{}' rejected: {}", selector, ReflowError::dom(err));
                None
            }
        }
    }
}

impl HostDocument for BrowserDocument {
    fn text_content(&self, selector: &str) -> Option<String> {
        self.query(selector)
            .map(|el| el.text_content().unwrap_or_default())
    }

    fn inner_markup(&self, selector: &str) -> Option<String> {
        self.query(selector).map(|el| el.inner_html())
    }
}
