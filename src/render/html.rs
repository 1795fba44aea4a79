//! HTML serialization of rendered blocks.
//!
//! Text nodes and attribute values are escaped. Trusted fragments go out
//! through the configured [`HtmlPolicy`](crate::html::HtmlPolicy), verbatim
//! by default.

use crate::attr::Attrs;
use crate::id::BlockKey;
use crate::node::{Element, Node};

use super::{RenderConfig, RenderedBlock, RenderedDocument};

/// Serialize a rendered document.
pub fn document_to_html(doc: &RenderedDocument, config: &RenderConfig) -> String {
    let mut output = String::new();
    for block in doc.iter() {
        write_block(block, config, &mut output);
        if config.pretty {
            output.push('\n');
        }
    }
    output
}

/// Serialize one rendered block, with its key when configured.
pub fn block_to_html(block: &RenderedBlock, config: &RenderConfig) -> String {
    let mut output = String::new();
    write_block(block, config, &mut output);
    output
}

/// Serialize a bare element (no key).
pub fn element_to_html(elem: &Element, config: &RenderConfig) -> String {
    let mut output = String::new();
    write_element(elem, None, config, &mut output);
    output
}

fn write_block(block: &RenderedBlock, config: &RenderConfig, output: &mut String) {
    let key = config.emit_keys.then_some(block.key);
    write_element(&block.node, key, config, output);
}

fn write_element(
    elem: &Element,
    key: Option<BlockKey>,
    config: &RenderConfig,
    output: &mut String,
) {
    output.push('<');
    output.push_str(&elem.tag);

    write_attrs(&elem.attrs, output);

    if let Some(key) = key {
        output.push(' ');
        output.push_str(config.key_attr());
        output.push_str("=\"");
        output.push_str(&key.to_attr_value());
        output.push('"');
    }

    // Void elements
    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');

    for child in &elem.children {
        write_node(child, config, output);
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn write_node(node: &Node, config: &RenderConfig, output: &mut String) {
    match node {
        Node::Element(elem) => write_element(elem, None, config, output),
        Node::Text(text) => output.push_str(&escape_html(&text.content)),
        Node::Html(html) => output.push_str(&config.html_policy.apply(html)),
    }
}

fn write_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs.iter() {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
