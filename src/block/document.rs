//! The content document: an ordered list of blocks.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, Block, BlockData};
use crate::error::{BlocksError, BlocksResult};
use crate::html::plain_text;
use crate::id::BlockId;

// =============================================================================
// ContentDocument
// =============================================================================

/// A parsed content document. Block order is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    /// Editor save timestamp (ms), carried but not rendered
    #[serde(deserialize_with = "lenient::opt_u64", skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(deserialize_with = "lenient::seq")]
    pub blocks: Vec<Block>,
    /// Editor version, carried but not rendered
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ContentDocument {
    /// Create a document from blocks
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// Parse the stored document text.
    ///
    /// JSON `null` is an absent document (`Ok(None)`), which renders to
    /// nothing. Anything that is not JSON, or not an object, is an error the
    /// caller is expected to turn into a fallback message.
    pub fn from_json(json: &str) -> BlocksResult<Option<Self>> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Same as [`from_json`](Self::from_json) for an already parsed value.
    pub fn from_value(value: Value) -> BlocksResult<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => {
                let doc: Self = serde_json::from_value(value)?;
                let duplicates = doc.duplicate_ids();
                if !duplicates.is_empty() {
                    tracing::warn!(
                        count = duplicates.len(),
                        first = %duplicates[0],
                        "content document has duplicate block ids"
                    );
                }
                Ok(Some(doc))
            }
            other => Err(BlocksError::not_an_object(&other)),
        }
    }

    /// Number of blocks, unknown ones included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Non-empty ids used by more than one block, each listed once, in order
    /// of first repetition.
    pub fn duplicate_ids(&self) -> Vec<&BlockId> {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        let mut duplicates = Vec::new();
        for block in self.blocks.iter().filter(|b| !b.id.is_empty()) {
            let count = seen.entry(block.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(&block.id);
            }
        }
        duplicates
    }

    /// Visible text of the textual blocks, tags stripped and whitespace
    /// collapsed. Used for excerpts and meta descriptions.
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut push = |html: &str| {
            let text = plain_text(html);
            if !text.is_empty() {
                parts.push(text);
            }
        };

        for block in &self.blocks {
            match &block.data {
                BlockData::Header(d) => push(d.text.as_str()),
                BlockData::Paragraph(d) => push(d.text.as_str()),
                BlockData::List(d) => d.items.iter().for_each(|item| push(&*item.display_text())),
                BlockData::Quote(d) => push(d.text.as_str()),
                BlockData::Warning(d) => {
                    push(d.title.as_str());
                    push(d.message.as_str());
                }
                BlockData::Scrolly(d) => d.steps.iter().for_each(|step| push(step.text.as_str())),
                BlockData::Table(d) => d
                    .content
                    .iter()
                    .flatten()
                    .for_each(|cell| push(cell.as_str())),
                BlockData::Image(_)
                | BlockData::Embed(_)
                | BlockData::Delimiter
                | BlockData::Spacer(_)
                | BlockData::Unknown(_) => {}
            }
        }
        parts.join(" ")
    }
}

impl<'a> IntoIterator for &'a ContentDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
