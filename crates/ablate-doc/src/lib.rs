//! Output document model for the Ablate configuration compiler.
//!
//! A [`Document`] wraps an immutable tree of [`Element`]s built with
//! [`ElementBuilder`]. Documents render to indented XML, to JSON via
//! serde, and expose a structural fingerprint for determinism checks.
//!
//! ```
//! use ablate_doc::{Document, Element};
//!
//! let doc = Document::new(
//!     Element::builder("gosmart")
//!         .attr("name", "elmer_libnuma")
//!         .child(Element::empty("optimizer"))
//!         .build(),
//! );
//! assert!(doc.to_xml().unwrap().contains("<optimizer />"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod hash;
mod xml;

pub use element::{Element, ElementBuilder};
pub use error::RenderError;

use serde::Serialize;

/// A complete output document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap a finished root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Top-level section called `name`.
    pub fn section(&self, name: &str) -> Option<&Element> {
        self.root.child(name)
    }

    /// Indented XML with declaration.
    ///
    /// Carriage returns are written as `&#13;` so they survive re-parsing.
    /// Fails if a name is not an XML name or a value holds a character
    /// XML 1.0 forbids.
    pub fn to_xml(&self) -> Result<String, RenderError> {
        xml::render(&self.root)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    /// 64-bit FNV-1a fingerprint of the tree.
    pub fn fingerprint(&self) -> u64 {
        hash::tree_hash(&self.root)
    }
}
