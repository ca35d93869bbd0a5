//! Captured pages as a `HostDocument`
//!
//! Wraps a well-formed (XHTML) snapshot of a host page. HTML-only constructs
//! such as named entities other than the five XML ones, void tags without a
//! closing slash, or a doctype are rejected by the parser.
//!
//! A page saved from the browser needs three edits before it loads here:
//! drop the `<!DOCTYPE html>` line, close void tags (`<br>` becomes `<br/>`,
//! likewise `meta`, `link`, `img`, `input`), and write named entities as
//! numeric references (`&nbsp;` becomes `&#160;`). Scripts and stylesheets
//! can be deleted; extraction only reads the heading, the artist link and the
//! chord block.

use super::selector::Selector;
use super::HostDocument;
use roxmltree::{Document, Node};

pub struct FixtureDocument<'a> {
    source: &'a str,
    doc: Document<'a>,
}

impl<'a> FixtureDocument<'a> {
    pub fn parse(source: &'a str) -> Result<Self, roxmltree::Error> {
        let doc = Document::parse(source)?;
        Ok(Self { source, doc })
    }

    /// First element in document order matching `selector`
    fn find(&self, selector: &str) -> Option<Node<'_, 'a>> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                log::warn!("unusable selector '{}': {}", selector, err);
                return None;
            }
        };

        self.doc.descendants().filter(|n| n.is_element()).find(|n| {
            selector.matches(n.tag_name().name(), |name: &str| n.attribute(name))
        })
    }
}

impl HostDocument for FixtureDocument<'_> {
    fn text_content(&self, selector: &str) -> Option<String> {
        let node = self.find(selector)?;
        Some(
            node.descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect(),
        )
    }

    fn inner_markup(&self, selector: &str) -> Option<String> {
        let node = self.find(selector)?;
        let (Some(first), Some(last)) = (node.first_child(), node.last_child()) else {
            return Some(String::new());
        };
        Some(self.source[first.range().start..last.range().end].to_string())
    }
}
