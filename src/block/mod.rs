//! Content documents and their blocks.
//!
//! A stored document is `{ "time"?, "version"?, "blocks": [{ "id", "type", "data" }] }`.
//! Each block decodes into [`Block`]: its id plus a [`BlockData`] variant chosen
//! from `type`. Payloads are read leniently: odd or missing fields take their
//! defaults, so a catalogue block always renders. Types outside the
//! catalogue become [`BlockData::Unknown`] and render to nothing.

mod data;
mod document;
pub(crate) mod lenient;

pub use data::*;
pub use document::ContentDocument;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::id::BlockId;

// =============================================================================
// BlockKind
// =============================================================================

/// The block type catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Paragraph,
    List,
    Image,
    Quote,
    Embed,
    Delimiter,
    Warning,
    Scrolly,
    Table,
    Spacer,
}

impl BlockKind {
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Header,
        BlockKind::Paragraph,
        BlockKind::List,
        BlockKind::Image,
        BlockKind::Quote,
        BlockKind::Embed,
        BlockKind::Delimiter,
        BlockKind::Warning,
        BlockKind::Scrolly,
        BlockKind::Table,
        BlockKind::Spacer,
    ];

    /// Parse the `type` field. Matching is exact.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Value of the `type` field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::Paragraph => "paragraph",
            BlockKind::List => "list",
            BlockKind::Image => "image",
            BlockKind::Quote => "quote",
            BlockKind::Embed => "embed",
            BlockKind::Delimiter => "delimiter",
            BlockKind::Warning => "warning",
            BlockKind::Scrolly => "scrolly",
            BlockKind::Table => "table",
            BlockKind::Spacer => "spacer",
        }
    }
}

// =============================================================================
// Block
// =============================================================================

/// One block of a content document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub data: BlockData,
}

/// Payload of a block, by type.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    Header(HeaderData),
    Paragraph(ParagraphData),
    List(ListData),
    Image(ImageData),
    Quote(QuoteData),
    Embed(EmbedData),
    Delimiter,
    Warning(WarningData),
    Scrolly(ScrollyData),
    Table(TableData),
    Spacer(SpacerData),
    Unknown(UnknownBlock),
}

/// A block the renderer does not understand, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    /// The `type` field as stored (empty when missing)
    pub type_name: String,
    pub data: Value,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, data: BlockData) -> Self {
        Self { id: id.into(), data }
    }

    /// Catalogue kind, `None` for unknown blocks.
    pub fn kind(&self) -> Option<BlockKind> {
        self.data.kind()
    }

    /// Value of the `type` field.
    pub fn type_name(&self) -> &str {
        match &self.data {
            BlockData::Unknown(unknown) => &unknown.type_name,
            known => known.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Decode a stored block. Never fails: anything unreadable becomes
    /// [`BlockData::Unknown`].
    pub fn from_value(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                tracing::warn!(found = %other, "block is not an object, skipping");
                return Self::new(BlockId::default(), BlockData::unknown("", other));
            }
        };

        let id = match map.remove("id") {
            Some(Value::String(s)) => BlockId::new(s),
            Some(Value::Number(n)) => BlockId::new(n.to_string()),
            _ => BlockId::default(),
        };
        let type_name = match map.remove("type") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        let data = match map.remove("data") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(data) => data,
        };

        let data = BlockData::decode(&type_name, data);
        Self { id, data }
    }
}

impl BlockData {
    pub fn kind(&self) -> Option<BlockKind> {
        Some(match self {
            BlockData::Header(_) => BlockKind::Header,
            BlockData::Paragraph(_) => BlockKind::Paragraph,
            BlockData::List(_) => BlockKind::List,
            BlockData::Image(_) => BlockKind::Image,
            BlockData::Quote(_) => BlockKind::Quote,
            BlockData::Embed(_) => BlockKind::Embed,
            BlockData::Delimiter => BlockKind::Delimiter,
            BlockData::Warning(_) => BlockKind::Warning,
            BlockData::Scrolly(_) => BlockKind::Scrolly,
            BlockData::Table(_) => BlockKind::Table,
            BlockData::Spacer(_) => BlockKind::Spacer,
            BlockData::Unknown(_) => return None,
        })
    }

    pub fn unknown(type_name: impl Into<String>, data: Value) -> Self {
        BlockData::Unknown(UnknownBlock {
            type_name: type_name.into(),
            data,
        })
    }

    /// Decode a payload for the given `type`.
    ///
    /// A catalogue type always yields its own variant: a payload that cannot
    /// be read even leniently falls back to the type's defaults. Only types
    /// outside the catalogue become [`BlockData::Unknown`].
    pub fn decode(type_name: &str, data: Value) -> Self {
        let Some(kind) = BlockKind::from_type_name(type_name) else {
            return Self::unknown(type_name, data);
        };

        match kind {
            BlockKind::Header => BlockData::Header(payload(type_name, &data)),
            BlockKind::Paragraph => BlockData::Paragraph(payload(type_name, &data)),
            BlockKind::List => BlockData::List(payload(type_name, &data)),
            BlockKind::Image => BlockData::Image(payload(type_name, &data)),
            BlockKind::Quote => BlockData::Quote(payload(type_name, &data)),
            BlockKind::Embed => BlockData::Embed(payload(type_name, &data)),
            BlockKind::Delimiter => BlockData::Delimiter,
            BlockKind::Warning => BlockData::Warning(payload(type_name, &data)),
            BlockKind::Scrolly => BlockData::Scrolly(payload(type_name, &data)),
            BlockKind::Table => BlockData::Table(payload(type_name, &data)),
            BlockKind::Spacer => BlockData::Spacer(payload(type_name, &data)),
        }
    }
}

/// Decode an object payload, or fall back to the defaults.
fn payload<T: DeserializeOwned + Default>(type_name: &str, data: &Value) -> T {
    if !data.is_object() {
        tracing::warn!(
            block_type = type_name,
            found = %data,
            "block data is not an object, using defaults"
        );
        return T::default();
    }
    T::deserialize(data).unwrap_or_else(|err| {
        tracing::warn!(
            block_type = type_name,
            error = %err,
            "malformed block payload, using defaults"
        );
        T::default()
    })
}

// =============================================================================
// Serde
// =============================================================================

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Block::from_value)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.type_name())?;
        match &self.data {
            BlockData::Header(d) => state.serialize_field("data", d)?,
            BlockData::Paragraph(d) => state.serialize_field("data", d)?,
            BlockData::List(d) => state.serialize_field("data", d)?,
            BlockData::Image(d) => state.serialize_field("data", d)?,
            BlockData::Quote(d) => state.serialize_field("data", d)?,
            BlockData::Embed(d) => state.serialize_field("data", d)?,
            BlockData::Delimiter => state.serialize_field("data", &Map::new())?,
            BlockData::Warning(d) => state.serialize_field("data", d)?,
            BlockData::Scrolly(d) => state.serialize_field("data", d)?,
            BlockData::Table(d) => state.serialize_field("data", d)?,
            BlockData::Spacer(d) => state.serialize_field("data", d)?,
            BlockData::Unknown(u) => state.serialize_field("data", &u.data)?,
        }
        state.end()
    }
}
