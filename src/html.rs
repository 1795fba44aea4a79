//! Trusted markup fragments embedded in block payloads.
//!
//! Editor output stores inline formatting as HTML strings (`<b>`, `<a>`,
//! `&nbsp;` ...). Those strings are inserted into the rendered output
//! verbatim, so they travel as [`TrustedHtml`] rather than `String`: any code
//! that emits one has to go through an [`HtmlPolicy`].

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

// =============================================================================
// TrustedHtml
// =============================================================================

/// A markup fragment authored in the CMS and rendered without escaping.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Wrap an authored fragment.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Raw markup, as authored.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// True for the empty string only. See [`is_blank`](Self::is_blank).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when nothing visible is left once tags, `&nbsp;` and whitespace
    /// are removed (`"<p>&nbsp;</p>"`, `"<br>"`, `"  "`).
    pub fn is_blank(&self) -> bool {
        let stripped = strip_tags(&self.0);
        stripped
            .replace("&nbsp;", "")
            .chars()
            .all(char::is_whitespace)
    }

    /// Visible text with tags removed, common entities decoded and
    /// whitespace collapsed.
    pub fn to_plain_text(&self) -> String {
        plain_text(&self.0)
    }
}

impl fmt::Debug for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrustedHtml({:?})", self.0)
    }
}

impl From<&str> for TrustedHtml {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TrustedHtml {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// Editors occasionally store `null` or a bare number where text belongs.
impl<'de> Deserialize<'de> for TrustedHtml {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(serde_json::Value::String(s)) => Self(s),
            Some(other) => Self(other.to_string()),
        })
    }
}

// =============================================================================
// HtmlPolicy
// =============================================================================

/// How trusted fragments are emitted by the HTML serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmlPolicy {
    /// Emit fragments exactly as authored.
    #[default]
    Trusted,
    /// Run every fragment through `ammonia` before emitting it.
    #[cfg(feature = "sanitize")]
    Sanitized,
}

impl HtmlPolicy {
    /// Apply the policy to a fragment.
    pub fn apply<'a>(&self, html: &'a TrustedHtml) -> Cow<'a, str> {
        match self {
            HtmlPolicy::Trusted => Cow::Borrowed(html.as_str()),
            #[cfg(feature = "sanitize")]
            HtmlPolicy::Sanitized => Cow::Owned(ammonia::clean(html.as_str())),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Remove every `<...>` tag, keeping text and entities.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(html, "")
}

/// Tag-free, entity-decoded, whitespace-collapsed text.
pub fn plain_text(html: &str) -> String {
    let stripped = strip_tags(html);
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    // `&amp;` last so `&amp;lt;` stays `&lt;`
    Cow::Owned(
        s.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&"),
    )
}
