//! content-blocks - Block-structured rich content and video references
//!
//! ## Core Concepts
//!
//! **Block documents**: stored content is an ordered list of typed blocks
//! (`{ id, type, data }`) produced by a block editor. Documents decode
//! leniently: a malformed field or payload of a known type reads as its
//! default, and only unknown types become [`BlockData::Unknown`], which
//! renders to nothing.
//!
//! **Trusted markup**: text fields of blocks carry inline HTML authored by
//! staff. It is wrapped in [`TrustedHtml`] and emitted unescaped, or through
//! `ammonia` with the `sanitize` feature and [`HtmlPolicy::Sanitized`].
//!
//! **Video references**: free-text video fields are resolved into loadable
//! URLs and classified as YouTube, direct file, or other embed.
//!
//! ## Modules
//! - `block`: Document and block types, lenient decoding
//! - `render`: Per-block rendering policies and HTML output
//! - `video`: YouTube id extraction, URL resolution, player selection
//! - `node`: Rendered element tree
//! - `html`: Trusted markup and plain-text helpers
//! - `id`: Block ids and derived keys
//!
//! ## Usage
//!
//! ```
//! use content_blocks::{ContentDocument, RenderConfig, render_html};
//!
//! let doc = ContentDocument::from_json(
//!     r#"{"blocks": [{"id": "a", "type": "header", "data": {"text": "Hi", "level": 1}}]}"#,
//! )
//! .unwrap();
//!
//! let html = render_html(doc.as_ref(), &RenderConfig::PROD);
//! assert_eq!(html, r#"<h1 class="block-header text-4xl font-bold">Hi</h1>"#);
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Attribute helpers
pub mod attr;

/// Content documents and blocks
pub mod block;

/// Error types
pub mod error;

/// Trusted markup
pub mod html;

/// Block identity and keys
pub mod id;

/// Element tree: Element, Node, Text
pub mod node;

/// Prelude for common imports
pub mod prelude;

/// Block rendering and HTML serialization
pub mod render;

/// Video reference handling
pub mod video;

// =============================================================================
// Re-exports
// =============================================================================

// Documents
pub use block::{Block, BlockData, BlockKind, ContentDocument, UnknownBlock};

// Node types
pub use node::{Children, Element, Node, Text};

// Attribute types
pub use attr::{Attrs, AttrsExt};

// Markup
pub use html::{HtmlPolicy, TrustedHtml};

// Identity
pub use id::{BlockId, BlockKey};

// Rendering
pub use render::{
    RenderConfig, RenderedBlock, RenderedDocument, render_batch, render_block, render_document,
    render_html,
};

// Video
pub use video::{PlayerSource, VideoFileType, extract_youtube_id, resolve_playable_url};

// Error types
pub use error::{BlocksError, BlocksResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(ContentDocument: Send, Sync, Clone);
    assert_impl_all!(RenderedDocument: Send, Sync);
    assert_impl_all!(RenderConfig: Send, Sync);
    assert_impl_all!(BlockKey: Copy, Send, Sync, std::hash::Hash);
    assert_impl_all!(BlocksError: Send, Sync, std::error::Error);

    #[test]
    fn test_end_to_end() {
        let json = r#"{
            "time": 1700000000000,
            "version": "2.28.0",
            "blocks": [
                {"id": "h", "type": "header", "data": {"text": "Welcome", "level": 2}},
                {"id": "p", "type": "paragraph", "data": {"text": "Watch <a href=\"/v\">this</a>"}},
                {"id": "s", "type": "spacer", "data": {}}
            ]
        }"#;
        let doc = ContentDocument::from_json(json).unwrap().unwrap();
        assert_eq!(doc.version.as_deref(), Some("2.28.0"));

        let html = render_html(Some(&doc), &RenderConfig::PROD);
        assert_eq!(
            html,
            concat!(
                r#"<h2 class="block-header text-3xl font-bold">Welcome</h2>"#,
                r#"<p class="block-paragraph">Watch <a href="/v">this</a></p>"#,
                r#"<div class="block-spacer" style="height: 32px" aria-hidden="true"></div>"#,
            )
        );
    }
}
