//! Immutable document elements and their builder.

use indexmap::IndexMap;
use serde::Serialize;

/// One node of the output tree.
///
/// Elements are immutable once built. Attribute and child order is the
/// order in which they were added to the [`ElementBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

impl Element {
    /// Start building an element called `name`.
    pub fn builder(name: impl Into<String>) -> ElementBuilder {
        ElementBuilder {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// An element with no attributes, text, or children.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child elements in order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children called `name`, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Accumulates the parts of an [`Element`].
#[derive(Clone, Debug)]
#[must_use]
pub struct ElementBuilder {
    name: String,
    attributes: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl ElementBuilder {
    /// Set an attribute. Setting an existing name replaces its value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Set an attribute only if `value` is present.
    pub fn attr_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Set the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order.
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Finish the element.
    pub fn build(self) -> Element {
        Element {
            name: self.name,
            attributes: self.attributes,
            text: self.text,
            children: self.children,
        }
    }
}
