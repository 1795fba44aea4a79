//! Prelude module for common imports.
//!
//! ```
//! use content_blocks::prelude::*;
//! ```

// Documents
pub use crate::block::{Block, BlockData, BlockKind, ContentDocument};

// Node types
pub use crate::node::{Element, Node, Text};

// Attributes
pub use crate::attr::{Attrs, AttrsExt};

// Markup
pub use crate::html::{HtmlPolicy, TrustedHtml};

// Identity
pub use crate::id::{BlockId, BlockKey};

// Rendering
pub use crate::render::{
    RenderConfig, RenderedBlock, RenderedDocument, render_batch, render_document, render_html,
};

// Video
pub use crate::video::{PlayerSource, resolve_playable_url};

// Error
pub use crate::error::{BlocksError, BlocksResult};
