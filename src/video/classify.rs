//! Video URL classification: YouTube references and direct video files.

use std::sync::LazyLock;

use regex::Regex;

/// Length of every YouTube video id.
pub const YOUTUBE_ID_LEN: usize = 11;

// Greedy prefix: the last marker wins (`.../watch?v=a&v=b` yields `b`).
static YOUTUBE_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("youtube pattern is valid")
});

// =============================================================================
// YouTube
// =============================================================================

/// The 11-character video id of a YouTube reference, if `input` has one of
/// the accepted shapes: `youtu.be/<id>`, `/v/<id>`, `/u/<x>/<id>`,
/// `/embed/<id>`, `watch?v=<id>`, `&v=<id>`.
pub fn extract_youtube_id(input: &str) -> Option<&str> {
    YOUTUBE_SHAPE_RE
        .captures(input)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .filter(|id| id.chars().count() == YOUTUBE_ID_LEN)
}

/// `https://www.youtube.com/embed/<id>` for a YouTube reference, `None` for
/// anything else (including the empty string).
pub fn extract_youtube_embed_url(input: &str) -> Option<String> {
    extract_youtube_id(input).map(youtube_embed_url)
}

/// Same rule as [`extract_youtube_embed_url`], as a predicate.
pub fn is_youtube_url(input: &str) -> bool {
    extract_youtube_id(input).is_some()
}

pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}

pub fn youtube_watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

// =============================================================================
// Video files
// =============================================================================

/// Container formats a `<video>` element can play directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFileType {
    Mp4,
    Webm,
    Ogg,
    Mov,
}

impl VideoFileType {
    const EXTENSIONS: [(&'static str, VideoFileType); 4] = [
        (".mp4", VideoFileType::Mp4),
        (".webm", VideoFileType::Webm),
        (".ogg", VideoFileType::Ogg),
        (".mov", VideoFileType::Mov),
    ];

    /// Classify by extension (ASCII case-insensitive). Query strings and
    /// fragments are not stripped: `clip.mp4?t=3` is not a video file.
    pub fn from_path(input: &str) -> Option<Self> {
        let lower = input.to_ascii_lowercase();
        Self::EXTENSIONS
            .into_iter()
            .find(|(ext, _)| lower.ends_with(ext))
            .map(|(_, kind)| kind)
    }

    /// MIME type for `<source type=..>`
    pub const fn mime_type(&self) -> &'static str {
        match self {
            VideoFileType::Mp4 => "video/mp4",
            VideoFileType::Webm => "video/webm",
            VideoFileType::Ogg => "video/ogg",
            VideoFileType::Mov => "video/quicktime",
        }
    }
}

/// True if `input` ends in `.mp4`, `.webm`, `.ogg` or `.mov` (any case).
pub fn is_video_file(input: &str) -> bool {
    VideoFileType::from_path(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBED: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

    #[test]
    fn test_accepted_shapes() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/u/w/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ#t=10",
        ] {
            assert_eq!(extract_youtube_embed_url(url).as_deref(), Some(EMBED), "{url}");
            assert!(is_youtube_url(url), "{url}");
        }
    }

    #[test]
    fn test_rejects_non_youtube() {
        for url in [
            "",
            "https://example.com/not-a-video",
            "https://vimeo.com/123456789",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_youtube_embed_url(url), None, "{url}");
            assert!(!is_youtube_url(url), "{url}");
        }
    }

    #[test]
    fn test_id_length_is_exact() {
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXc"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQQ"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_last_marker_wins() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&v=short"),
            None
        );
    }

    #[test]
    fn test_video_files() {
        assert!(is_video_file("https://cdn.example.com/intro.mp4"));
        assert!(is_video_file("lesson.WEBM"));
        assert!(is_video_file("a.ogg"));
        assert!(is_video_file("clip.MoV"));
        assert!(!is_video_file(""));
        assert!(!is_video_file("intro.mp4?token=1"));
        assert!(!is_video_file("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!is_video_file("mp4"));

        assert_eq!(VideoFileType::from_path("x.mov"), Some(VideoFileType::Mov));
        assert_eq!(VideoFileType::Mov.mime_type(), "video/quicktime");
    }
}
