//! Rendering documents to element trees and HTML.
//!
//! ```text
//! ContentDocument ──render_document──► RenderedDocument ──to_html──► String
//!        │                                    │
//!   Vec<Block>                     Vec<RenderedBlock{key, role, node}>
//! ```
//!
//! Rendering is pure: the same document and config always give the same
//! output. Unknown blocks are dropped; every other block produces exactly one
//! top-level element, in document order.

mod blocks;
mod config;
mod html;

pub use blocks::{DELIMITER_MARK, EMPTY_PARAGRAPH_HEIGHT, HeaderSize, render_block};
pub use config::{DEFAULT_KEY_ATTR, RenderConfig};
pub use html::{block_to_html, document_to_html, element_to_html, escape_attr, escape_html};

use rustc_hash::FxHashMap;

use crate::block::{BlockKind, ContentDocument};
use crate::id::{BlockId, BlockKey};
use crate::node::Element;

// =============================================================================
// Output types
// =============================================================================

/// One block's rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Deterministic key, stable across re-renders of the same document
    pub key: BlockKey,
    pub id: BlockId,
    /// Rendering role; an empty paragraph reports [`BlockKind::Spacer`]
    pub role: BlockKind,
    pub node: Element,
}

/// Rendered blocks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderedBlock> {
        self.blocks.iter()
    }

    /// Roles of the rendered blocks, in order.
    pub fn roles(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.role).collect()
    }

    pub fn to_html(&self, config: &RenderConfig) -> String {
        document_to_html(self, config)
    }
}

impl<'a> IntoIterator for &'a RenderedDocument {
    type Item = &'a RenderedBlock;
    type IntoIter = std::slice::Iter<'a, RenderedBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Render a document. An absent document renders to nothing.
///
/// Keys come from block ids. A repeated id gets its occurrence index mixed
/// in, and a block with an empty id is keyed by its position, so keys are
/// unique within a document.
pub fn render_document(doc: Option<&ContentDocument>, config: &RenderConfig) -> RenderedDocument {
    let Some(doc) = doc else {
        return RenderedDocument::default();
    };

    let mut occurrences: FxHashMap<&str, usize> = FxHashMap::default();
    let mut blocks = Vec::with_capacity(doc.blocks.len());

    for (position, block) in doc.blocks.iter().enumerate() {
        let occurrence = if block.id.is_empty() {
            0
        } else {
            let seen = occurrences.entry(block.id.as_str()).or_insert(0);
            let current = *seen;
            *seen += 1;
            current
        };

        let Some((role, node)) = render_block(block, config) else {
            tracing::debug!(position, block_type = block.type_name(), "skipping unknown block");
            continue;
        };

        blocks.push(RenderedBlock {
            key: BlockKey::for_block(&block.id, occurrence, position),
            id: block.id.clone(),
            role,
            node,
        });
    }

    tracing::debug!(blocks = doc.blocks.len(), rendered = blocks.len(), "rendered document");
    RenderedDocument { blocks }
}

/// Render a document straight to HTML.
pub fn render_html(doc: Option<&ContentDocument>, config: &RenderConfig) -> String {
    render_document(doc, config).to_html(config)
}

/// Render many documents. Uses rayon when the `parallel` feature is on;
/// output order matches input order either way.
pub fn render_batch(docs: &[ContentDocument], config: &RenderConfig) -> Vec<RenderedDocument> {
    tracing::debug!(documents = docs.len(), "rendering batch");

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        docs.par_iter()
            .map(|doc| render_document(Some(doc), config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        docs.iter()
            .map(|doc| render_document(Some(doc), config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: serde_json::Value) -> ContentDocument {
        ContentDocument::from_value(value).unwrap().unwrap()
    }

    #[test]
    fn test_absent_document() {
        let rendered = render_document(None, &RenderConfig::default());
        assert!(rendered.is_empty());
        assert_eq!(render_html(None, &RenderConfig::default()), "");
    }

    #[test]
    fn test_unknown_blocks_dropped_order_kept() {
        let d = doc(json!({"blocks": [
            {"id": "a", "type": "header", "data": {"text": "Title", "level": 1}},
            {"id": "b", "type": "mystery", "data": {}},
            {"id": "c", "type": "paragraph", "data": {"text": ""}},
            {"id": "d", "type": "delimiter", "data": {}}
        ]}));
        let rendered = render_document(Some(&d), &RenderConfig::default());
        assert_eq!(
            rendered.roles(),
            [BlockKind::Header, BlockKind::Spacer, BlockKind::Delimiter]
        );
        let ids: Vec<_> = rendered.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn test_duplicate_ids_get_distinct_keys() {
        let d = doc(json!({"blocks": [
            {"id": "x", "type": "delimiter"},
            {"id": "x", "type": "delimiter"},
            {"id": "", "type": "delimiter"},
            {"type": "delimiter"}
        ]}));
        let rendered = render_document(Some(&d), &RenderConfig::default());
        let keys: Vec<_> = rendered.iter().map(|b| b.key).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(keys[0], BlockKey::for_block(&BlockId::new("x"), 0, 0));
        assert_eq!(keys[1], BlockKey::for_block(&BlockId::new("x"), 1, 1));
    }

    #[test]
    fn test_deterministic() {
        let d = doc(json!({"blocks": [
            {"id": "a", "type": "list", "data": {"items": ["one", "two"]}},
            {"id": "b", "type": "quote", "data": {"text": "q", "caption": "c"}}
        ]}));
        let config = RenderConfig::DEV;
        assert_eq!(render_document(Some(&d), &config), render_document(Some(&d), &config));
        assert_eq!(render_html(Some(&d), &config), render_html(Some(&d), &config));
    }

    #[test]
    fn test_html_output() {
        let d = doc(json!({"blocks": [
            {"id": "p1", "type": "paragraph", "data": {"text": "Hello <b>world</b>"}}
        ]}));
        let html = render_html(Some(&d), &RenderConfig::PROD);
        assert_eq!(html, r#"<p class="block-paragraph">Hello <b>world</b></p>"#);

        let keyed = render_html(Some(&d), &RenderConfig::default());
        let key = BlockKey::for_block(&BlockId::new("p1"), 0, 0);
        assert!(keyed.contains(&format!(r#"data-block-key="{}""#, key.to_attr_value())));
    }

    #[test]
    fn test_batch_matches_single() {
        let docs = vec![
            doc(json!({"blocks": [{"id": "a", "type": "delimiter"}]})),
            doc(json!({"blocks": []})),
            doc(json!({"blocks": [{"id": "h", "type": "header", "data": {"text": "T"}}]})),
        ];
        let config = RenderConfig::default();
        let batch = render_batch(&docs, &config);
        assert_eq!(batch.len(), 3);
        for (d, rendered) in docs.iter().zip(&batch) {
            assert_eq!(rendered, &render_document(Some(d), &config));
        }
    }
}
