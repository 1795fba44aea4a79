//! Rendered node tree.
//!
//! Block renderers build small trees of [`Element`]s; the HTML serializer in
//! [`crate::render`] turns them into text. Three leaf kinds exist:
//!
//! - `Element` - tag, attributes, children
//! - `Text` - plain text, escaped on output
//! - `Html` - a [`TrustedHtml`] fragment, emitted through the configured
//!   [`HtmlPolicy`](crate::html::HtmlPolicy)

mod element;
mod text;

pub use element::Element;
pub use text::Text;

use smallvec::SmallVec;

use crate::html::TrustedHtml;

/// Node in a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
    Html(TrustedHtml),
}

impl Node {
    /// Check if this is an element node.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a trusted markup node.
    #[inline]
    pub fn is_html(&self) -> bool {
        matches!(self, Node::Html(_))
    }

    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as text reference.
    #[inline]
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get as trusted markup reference.
    #[inline]
    pub fn as_html(&self) -> Option<&TrustedHtml> {
        match self {
            Node::Html(h) => Some(h),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<TrustedHtml> for Node {
    fn from(html: TrustedHtml) -> Self {
        Node::Html(html)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 4]>;
