/// Page access used by the reconciler and the comments watch

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// The few DOM capabilities needed to hide page regions
pub trait PageDom {
    /// Whether an element matching `selector` currently exists
    fn is_available(&self, selector: &str) -> bool;

    /// Whether the first match of `selector` carries the `hidden` attribute
    fn is_hidden(&self, selector: &str) -> bool;

    /// Set the `hidden` attribute on the first match of `selector`, if any
    fn hide(&self, selector: &str);
}

/// The live page document
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> WebDocument {
        WebDocument { document }
    }

    fn query(&self, selector: &str) -> Option<HtmlElement> {
        match self.document.query_selector(selector) {
            Ok(element) => element.and_then(|e| e.dyn_into::<HtmlElement>().ok()),
            Err(e) => {
                log::warn!("Invalid selector {}: {:?}", selector, e);
                None
            }
        }
    }
}

impl PageDom for WebDocument {
    fn is_available(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn is_hidden(&self, selector: &str) -> bool {
        self.query(selector).is_some_and(|element| element.hidden())
    }

    fn hide(&self, selector: &str) {
        if let Some(element) = self.query(selector) {
            element.set_hidden(true);
        }
    }
}
