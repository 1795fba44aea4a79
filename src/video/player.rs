//! Choosing a player for a video reference.
//!
//! The course player and testimonial cards resolve the authored reference
//! first, then pick a native `<video>` for direct files and an `<iframe>`
//! player for everything else.

use crate::node::Element;

use super::classify::{VideoFileType, extract_youtube_id, youtube_embed_url};
use super::resolve::resolve_playable_url;

/// Permissions granted to embedded players.
pub const IFRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// What to load for a video reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// A file the browser plays itself
    NativeVideo {
        url: String,
        file_type: VideoFileType,
    },
    /// A YouTube video, as its embed URL
    YouTube { video_id: String, embed_url: String },
    /// Any other embeddable page (Vimeo, Loom, ...)
    Embed { url: String },
}

impl PlayerSource {
    /// Resolve a raw reference and classify the result. `None` for empty
    /// input; anything else yields a source, even if it will not play.
    pub fn from_reference(raw: &str) -> Option<Self> {
        resolve_playable_url(raw).map(Self::from_resolved)
    }

    /// Classify an already resolved URL.
    pub fn from_resolved(url: String) -> Self {
        if let Some(file_type) = VideoFileType::from_path(&url) {
            return PlayerSource::NativeVideo { url, file_type };
        }
        if let Some(id) = extract_youtube_id(&url) {
            return PlayerSource::YouTube {
                video_id: id.to_string(),
                embed_url: youtube_embed_url(id),
            };
        }
        PlayerSource::Embed { url }
    }

    /// URL the player element loads.
    pub fn url(&self) -> &str {
        match self {
            PlayerSource::NativeVideo { url, .. } => url,
            PlayerSource::YouTube { embed_url, .. } => embed_url,
            PlayerSource::Embed { url } => url,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, PlayerSource::NativeVideo { .. })
    }

    /// Player markup inside a 16:9 wrapper.
    pub fn to_element(&self) -> Element {
        let player = match self {
            PlayerSource::NativeVideo { url, file_type } => Element::new("video")
                .with_class("video-player")
                .attr("controls", "")
                .attr("playsinline", "")
                .attr("preload", "metadata")
                .child(
                    Element::new("source")
                        .attr("src", url.as_str())
                        .attr("type", file_type.mime_type()),
                ),
            PlayerSource::YouTube { embed_url, .. } => iframe_element(embed_url),
            PlayerSource::Embed { url } => iframe_element(url),
        };
        Element::new("div")
            .with_class("video-wrapper aspect-video")
            .child(player)
    }
}

/// `<iframe>` for an embeddable player page.
pub(crate) fn iframe_element(src: &str) -> Element {
    Element::new("iframe")
        .with_class("video-player")
        .attr("src", src)
        .attr("frameborder", "0")
        .attr("allow", IFRAME_ALLOW)
        .attr("allowfullscreen", "")
        .attr("loading", "lazy")
}
