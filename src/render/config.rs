//! Rendering configuration.

use crate::html::HtmlPolicy;

/// Default attribute name for block keys.
pub const DEFAULT_KEY_ATTR: &str = "data-block-key";

/// Configuration for block rendering and HTML output.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to write each block's key onto its top-level element.
    pub emit_keys: bool,
    /// Whether to put a newline after each block in HTML output.
    pub pretty: bool,
    /// Attribute name for block keys (default: "data-block-key").
    pub key_attr_name: String,
    /// How trusted markup fragments are emitted.
    pub html_policy: HtmlPolicy,
    /// Rewrite YouTube watch/short URLs in embed blocks to their embed form.
    /// When off, `data.embed` is used as-is.
    pub normalize_embeds: bool,
}

impl RenderConfig {
    /// Development config (emit keys, one block per line).
    pub const DEV: Self = Self {
        emit_keys: true,
        pretty: true,
        key_attr_name: String::new(), // Will use DEFAULT_KEY_ATTR
        html_policy: HtmlPolicy::Trusted,
        normalize_embeds: false,
    };

    /// Production config (no keys, compact output).
    pub const PROD: Self = Self {
        emit_keys: false,
        pretty: false,
        key_attr_name: String::new(),
        html_policy: HtmlPolicy::Trusted,
        normalize_embeds: false,
    };

    /// Create a new config.
    pub fn new(emit_keys: bool, pretty: bool) -> Self {
        Self {
            emit_keys,
            pretty,
            key_attr_name: DEFAULT_KEY_ATTR.to_string(),
            html_policy: HtmlPolicy::default(),
            normalize_embeds: false,
        }
    }

    /// Set a custom attribute name for block keys.
    pub fn with_key_attr(mut self, attr_name: impl Into<String>) -> Self {
        self.key_attr_name = attr_name.into();
        self
    }

    pub fn with_html_policy(mut self, policy: HtmlPolicy) -> Self {
        self.html_policy = policy;
        self
    }

    pub fn with_normalized_embeds(mut self, normalize: bool) -> Self {
        self.normalize_embeds = normalize;
        self
    }

    /// Get the attribute name for block keys.
    pub fn key_attr(&self) -> &str {
        if self.key_attr_name.is_empty() {
            DEFAULT_KEY_ATTR
        } else {
            &self.key_attr_name
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_use_default_key_attr() {
        assert_eq!(RenderConfig::DEV.key_attr(), DEFAULT_KEY_ATTR);
        assert_eq!(RenderConfig::PROD.key_attr(), DEFAULT_KEY_ATTR);
        assert!(!RenderConfig::PROD.emit_keys);
    }

    #[test]
    fn test_builder() {
        let config = RenderConfig::default()
            .with_key_attr("data-k")
            .with_normalized_embeds(true);
        assert_eq!(config.key_attr(), "data-k");
        assert!(config.normalize_embeds);
        assert_eq!(config.html_policy, HtmlPolicy::Trusted);
    }
}
