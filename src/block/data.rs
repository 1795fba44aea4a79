//! Typed payloads of the known block types.
//!
//! Field names follow the editor's JSON (`withBorder`, `triggerId` ...).
//! Every field has a default so a sparse payload still decodes.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::html::TrustedHtml;

/// Spacer height in pixels when the payload has none.
pub const DEFAULT_SPACER_HEIGHT: f64 = 32.0;

/// Header level when the payload has none.
pub const DEFAULT_HEADER_LEVEL: u8 = 2;

// =============================================================================
// Header / Paragraph
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    pub text: TrustedHtml,
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl HeaderData {
    /// Authored level, `DEFAULT_HEADER_LEVEL` when absent or zero.
    pub fn level(&self) -> u8 {
        match self.level {
            Some(0) | None => DEFAULT_HEADER_LEVEL,
            Some(level) => u8::try_from(level).unwrap_or(u8::MAX),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphData {
    pub text: TrustedHtml,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

// =============================================================================
// List
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListData {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub items: Vec<ListItem>,
}

impl ListData {
    pub fn is_ordered(&self) -> bool {
        self.style.as_deref() == Some("ordered")
    }
}

/// One list entry as stored: a string, an object, or something unexpected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl ListItem {
    /// Markup to render for this item.
    ///
    /// Objects use a truthy `content`, then a truthy `text`, then fall back
    /// to their compact JSON form (`{}` for an empty object). Truthy means a
    /// non-empty string, a non-zero number or `true`; numbers and booleans
    /// render in their JSON form. The fallback only keeps odd shapes from
    /// breaking the page.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            ListItem::Text(s) => Cow::Borrowed(s),
            ListItem::Object(map) => truthy_text(map, "content")
                .or_else(|| truthy_text(map, "text"))
                .unwrap_or_else(|| Cow::Owned(Value::Object(map.clone()).to_string())),
            ListItem::Other(value) => Cow::Owned(value.to_string()),
        }
    }
}

fn truthy_text<'a>(map: &'a Map<String, Value>, key: &str) -> Option<Cow<'a, str>> {
    match map.get(key)? {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s)),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
            Some(Cow::Owned(n.to_string()))
        }
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        _ => None,
    }
}

// =============================================================================
// Image
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageFile {
    pub url: String,
}

// `{url}` as written by the editor, a bare string from hand-made documents,
// anything else empty.
impl<'de> Deserialize<'de> for ImageFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(url)) => url,
            Some(Value::Object(mut map)) => match map.remove("url") {
                Some(Value::String(url)) => url,
                _ => String::new(),
            },
            _ => String::new(),
        };
        Ok(Self { url })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    pub file: ImageFile,
    /// Older documents put the address at the top level
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<TrustedHtml>,
    #[serde(deserialize_with = "lenient::flag")]
    pub with_background: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub with_border: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub stretched: bool,
}

impl ImageData {
    pub fn src(&self) -> &str {
        if self.file.url.is_empty() {
            self.url.as_deref().unwrap_or("")
        } else {
            &self.file.url
        }
    }

    /// Caption, if present and not empty.
    pub fn caption(&self) -> Option<&TrustedHtml> {
        self.caption.as_ref().filter(|c| !c.is_empty())
    }
}

// =============================================================================
// Quote / Embed / Warning
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    pub text: TrustedHtml,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<TrustedHtml>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

impl QuoteData {
    pub fn is_centered(&self) -> bool {
        self.alignment.as_deref() == Some("center")
    }

    pub fn caption(&self) -> Option<&TrustedHtml> {
        self.caption.as_ref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedData {
    /// Ready-to-use iframe address
    #[serde(deserialize_with = "lenient::string")]
    pub embed: String,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Address the author pasted, before the editor rewrote it
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<TrustedHtml>,
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl EmbedData {
    pub fn caption(&self) -> Option<&TrustedHtml> {
        self.caption.as_ref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningData {
    pub title: TrustedHtml,
    pub message: TrustedHtml,
}

// =============================================================================
// Scrolly
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollyBackground {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollyStep {
    /// Refers to `ScrollyBackground::id`
    #[serde(deserialize_with = "lenient::string")]
    pub trigger_id: String,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub text: TrustedHtml,
}

impl ScrollyStep {
    pub fn position(&self) -> CardPosition {
        match self.position.as_deref() {
            Some("left") => CardPosition::Left,
            Some("right") => CardPosition::Right,
            _ => CardPosition::Center,
        }
    }
}

/// Horizontal placement of a scrolly text card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPosition {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollyData {
    #[serde(deserialize_with = "lenient::seq")]
    pub backgrounds: Vec<ScrollyBackground>,
    #[serde(deserialize_with = "lenient::seq")]
    pub steps: Vec<ScrollyStep>,
}

impl ScrollyData {
    /// First background whose id equals the step's trigger.
    pub fn background_for(&self, step: &ScrollyStep) -> Option<&ScrollyBackground> {
        self.backgrounds.iter().find(|bg| bg.id == step.trigger_id)
    }
}

// =============================================================================
// Table / Spacer
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableData {
    #[serde(deserialize_with = "lenient::seq")]
    pub content: Vec<Vec<TrustedHtml>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub with_headings: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacerData {
    #[serde(deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl SpacerData {
    /// Height in pixels, as stored (fractions and negatives included);
    /// absent or zero means `DEFAULT_SPACER_HEIGHT`.
    pub fn height(&self) -> f64 {
        match self.height {
            Some(h) if h != 0.0 => h,
            _ => DEFAULT_SPACER_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> ListItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_list_item_text() {
        assert_eq!(item(r#""plain""#).display_text(), "plain");
        assert_eq!(item(r#"{"content": "A", "text": "x"}"#).display_text(), "A");
        assert_eq!(item(r#"{"text": "B"}"#).display_text(), "B");
        assert_eq!(item(r#"{"content": "", "text": "C"}"#).display_text(), "C");
    }

    #[test]
    fn test_list_item_scalar_content() {
        assert_eq!(item(r#"{"content": 5}"#).display_text(), "5");
        assert_eq!(item(r#"{"content": 2.5}"#).display_text(), "2.5");
        assert_eq!(item(r#"{"text": true}"#).display_text(), "true");
        assert_eq!(item(r#"{"content": 0, "text": "B"}"#).display_text(), "B");
        assert_eq!(item(r#"{"content": false}"#).display_text(), r#"{"content":false}"#);
    }

    #[test]
    fn test_list_item_malformed_falls_back_to_json() {
        assert_eq!(item("{}").display_text(), "{}");
        assert_eq!(item(r#"{"items": []}"#).display_text(), r#"{"items":[]}"#);
        assert_eq!(item("42").display_text(), "42");
        assert_eq!(item("null").display_text(), "null");
    }

    #[test]
    fn test_header_level() {
        let header: HeaderData = serde_json::from_str(r#"{"text": "t"}"#).unwrap();
        assert_eq!(header.level(), DEFAULT_HEADER_LEVEL);
        let header: HeaderData = serde_json::from_str(r#"{"text": "t", "level": "3"}"#).unwrap();
        assert_eq!(header.level(), 3);
        let header: HeaderData = serde_json::from_str(r#"{"level": 900}"#).unwrap();
        assert_eq!(header.level(), u8::MAX);
    }

    #[test]
    fn test_spacer_height_defaults() {
        assert_eq!(SpacerData::default().height(), 32.0);
        assert_eq!(SpacerData { height: Some(0.0) }.height(), 32.0);
        assert_eq!(SpacerData { height: Some(80.0) }.height(), 80.0);

        let spacer: SpacerData = serde_json::from_str(r#"{"height": 12.5}"#).unwrap();
        assert_eq!(spacer.height(), 12.5);
        let spacer: SpacerData = serde_json::from_str(r#"{"height": -8}"#).unwrap();
        assert_eq!(spacer.height(), -8.0);
    }

    #[test]
    fn test_null_and_odd_string_fields() {
        let image: ImageData = serde_json::from_str(r#"{"file": {"url": null}}"#).unwrap();
        assert_eq!(image.src(), "");
        let image: ImageData = serde_json::from_str(r#"{"file": "/bare.png"}"#).unwrap();
        assert_eq!(image.src(), "/bare.png");

        let embed: EmbedData = serde_json::from_str(r#"{"embed": null, "service": 7}"#).unwrap();
        assert_eq!(embed.embed, "");
        assert_eq!(embed.service.as_deref(), Some("7"));

        let list: ListData = serde_json::from_str(r#"{"style": 1, "items": ["a"]}"#).unwrap();
        assert!(!list.is_ordered());
        assert_eq!(list.items.len(), 1);

        let scrolly: ScrollyData = serde_json::from_str(
            r#"{
                "backgrounds": [{"id": null, "src": "/x.jpg"}, "junk"],
                "steps": [{"triggerId": null}]
            }"#,
        )
        .unwrap();
        assert_eq!(scrolly.backgrounds.len(), 1);
        assert_eq!(scrolly.steps[0].trigger_id, "");
    }

    #[test]
    fn test_image_src_fallback() {
        let image: ImageData = serde_json::from_str(r#"{"url": "/old.png"}"#).unwrap();
        assert_eq!(image.src(), "/old.png");
        let image: ImageData =
            serde_json::from_str(r#"{"file": {"url": "/new.png"}, "url": "/old.png"}"#).unwrap();
        assert_eq!(image.src(), "/new.png");
    }

    #[test]
    fn test_empty_caption_is_absent() {
        let image: ImageData = serde_json::from_str(r#"{"caption": ""}"#).unwrap();
        assert!(image.caption().is_none());
    }

    #[test]
    fn test_scrolly_background_lookup() {
        let scrolly: ScrollyData = serde_json::from_str(
            r#"{
                "backgrounds": [{"id": "a", "src": "1.jpg"}, {"id": "a", "src": "2.jpg"}],
                "steps": [{"triggerId": "a", "text": "x"}, {"triggerId": "zz", "position": "left"}]
            }"#,
        )
        .unwrap();

        let first = scrolly.background_for(&scrolly.steps[0]).unwrap();
        assert_eq!(first.src, "1.jpg");
        assert!(scrolly.background_for(&scrolly.steps[1]).is_none());
        assert_eq!(scrolly.steps[1].position(), CardPosition::Left);
        assert_eq!(scrolly.steps[0].position(), CardPosition::Center);
    }
}
