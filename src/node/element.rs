//! Element type - HTML elements of a rendered block
//!
//! Built with a consuming builder (`Element::new("p").with_class(..).html(..)`)
//! by the block renderers, queried by tests and page code.

use compact_str::CompactString;

use crate::attr::{Attrs, AttrsExt};
use crate::html::TrustedHtml;

use super::{Children, Node, Text};

// =============================================================================
// Element
// =============================================================================

/// HTML element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// HTML tag name
    pub tag: CompactString,
    /// Element attributes, in insertion order
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: CompactString::new(tag),
            attrs: Vec::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Append class names
    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.add_class(class);
        self
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Append a child element
    pub fn child(mut self, elem: Element) -> Self {
        self.push_elem(elem);
        self
    }

    /// Append a child element if present
    pub fn child_opt(mut self, elem: Option<Element>) -> Self {
        if let Some(elem) = elem {
            self.push_elem(elem);
        }
        self
    }

    /// Append escaped text
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.push_text(content);
        self
    }

    /// Append a trusted markup fragment
    pub fn html(mut self, html: TrustedHtml) -> Self {
        self.push_html(html);
        self
    }

    pub fn push_elem(&mut self, elem: Element) {
        self.children.push(Node::Element(Box::new(elem)));
    }

    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::Text(Text::new(content)));
    }

    pub fn push_html(&mut self, html: TrustedHtml) {
        self.children.push(Node::Html(html));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set_attr(name, value);
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    /// Get the `class` attribute
    pub fn class(&self) -> Option<&str> {
        self.get_attr("class")
    }

    /// Check for a single class name
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs.has_class(class)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| n.as_element())
    }

    /// Concatenated content of descendant text nodes and trusted fragments
    /// (fragments as authored, tags included)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Html(h) => buf.push_str(h.as_str()),
                Node::Element(e) => e.collect_text(buf),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first, self included)
    pub fn find<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.find_in(&predicate)
    }

    fn find_in<F>(&self, predicate: &F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children_elements()
            .find_map(|child| child.find_in(predicate))
    }

    /// Find all elements matching predicate, in document order
    pub fn find_all<F>(&self, predicate: F) -> Vec<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut results = Vec::new();
        self.collect_matching(&predicate, &mut results);
        results
    }

    fn collect_matching<'a, F>(&'a self, predicate: &F, results: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        if predicate(self) {
            results.push(self);
        }
        for child in self.children_elements() {
            child.collect_matching(predicate, results);
        }
    }

    /// Check if any element matches predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Element) -> bool,
    {
        self.find(predicate).is_some()
    }
}
