//! Playable-URL resolution for free-text video references.
//!
//! Staff paste all sorts of things into the video field: bare YouTube ids,
//! `youtu.be/...` without a scheme, full URLs, whole `<iframe>` snippets.
//! [`resolve_playable_url`] turns those into something a player can load by
//! running [`RESOLVE_RULES`] in order; the first rule that applies wins.
//!
//! The result is best effort. The last rule passes the input through
//! unchanged, so callers must cope with a string that does not play.

use std::sync::LazyLock;

use regex::Regex;

use super::classify::youtube_watch_url;

static IFRAME_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).expect("iframe src pattern is valid"));

static BARE_YOUTUBE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("youtube id pattern is valid"));

// =============================================================================
// Rules
// =============================================================================

/// One step of the resolution chain. `apply` receives the trimmed,
/// non-empty input and returns `None` when the rule does not apply.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<String>,
}

/// Resolution rules in precedence order.
pub static RESOLVE_RULES: [ResolveRule; 4] = [
    ResolveRule {
        name: "iframe-src",
        apply: iframe_src,
    },
    ResolveRule {
        name: "bare-youtube-id",
        apply: bare_youtube_id,
    },
    ResolveRule {
        name: "missing-scheme",
        apply: missing_scheme,
    },
    ResolveRule {
        name: "passthrough",
        apply: passthrough,
    },
];

/// `<iframe ... src="X" ...>` → `X`, verbatim.
fn iframe_src(input: &str) -> Option<String> {
    if !input.starts_with("<iframe") {
        return None;
    }
    IFRAME_SRC_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Exactly eleven id characters and nothing else → YouTube watch URL.
fn bare_youtube_id(input: &str) -> Option<String> {
    BARE_YOUTUBE_ID_RE
        .is_match(input)
        .then(|| youtube_watch_url(input))
}

/// `example.com/x` → `https://example.com/x`. Requires a dot and no
/// whitespace, and skips anything already starting with `http` or `//`.
fn missing_scheme(input: &str) -> Option<String> {
    let applies = !input.starts_with("http")
        && !input.starts_with("//")
        && input.contains('.')
        && !input.chars().any(char::is_whitespace);
    applies.then(|| format!("https://{input}"))
}

fn passthrough(input: &str) -> Option<String> {
    Some(input.to_string())
}

// =============================================================================
// Resolution
// =============================================================================

/// A resolved reference and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub rule: &'static str,
}

/// Resolve a reference, reporting which rule fired. `None` for empty or
/// whitespace-only input.
pub fn resolve_with_rule(raw: &str) -> Option<Resolved> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }

    RESOLVE_RULES.iter().find_map(|rule| {
        (rule.apply)(input).map(|url| {
            tracing::trace!(rule = rule.name, input, url = %url, "resolved video reference");
            Resolved {
                url,
                rule: rule.name,
            }
        })
    })
}

/// Normalize a free-text video reference into a loadable URL.
///
/// ```
/// use content_blocks::video::resolve_playable_url;
///
/// assert_eq!(
///     resolve_playable_url("dQw4w9WgXcQ").as_deref(),
///     Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
/// );
/// assert_eq!(resolve_playable_url("   "), None);
/// ```
pub fn resolve_playable_url(raw: &str) -> Option<String> {
    resolve_with_rule(raw).map(|resolved| resolved.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(raw: &str) -> Option<&'static str> {
        resolve_with_rule(raw).map(|r| r.rule)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(resolve_playable_url(""), None);
        assert_eq!(resolve_playable_url(" \n\t"), None);
    }

    #[test]
    fn test_iframe_unwrap_is_verbatim() {
        let snippet = concat!(
            r#"<iframe width="560" src="https://www.youtube.com/embed/dQw4w9WgXcQ?si=x" "#,
            r#"allowfullscreen></iframe>"#
        );
        assert_eq!(
            resolve_playable_url(snippet).as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?si=x")
        );
        assert_eq!(rule_for(snippet), Some("iframe-src"));

        // the extracted value is not classified further
        let snippet = r#"<iframe src="dQw4w9WgXcQ"></iframe>"#;
        assert_eq!(resolve_playable_url(snippet).as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_iframe_without_src_falls_through() {
        let snippet = "<iframe></iframe>";
        assert_eq!(rule_for(snippet), Some("passthrough"));
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(
            resolve_playable_url("  dQw4w9WgXcQ ").as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(rule_for("a_b-c_d-e_f"), Some("bare-youtube-id"));
        // ten and twelve characters do not qualify
        assert_eq!(rule_for("dQw4w9WgXc"), Some("passthrough"));
        assert_eq!(rule_for("dQw4w9WgXcQQ"), Some("passthrough"));
        // a dotted eleven-character string is a domain
        assert_eq!(rule_for("abcdefg.com"), Some("missing-scheme"));
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(
            resolve_playable_url("youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://youtu.be/dQw4w9WgXcQ")
        );
        assert_eq!(resolve_playable_url("example.com").as_deref(), Some("https://example.com"));
        assert_eq!(
            resolve_playable_url("not a url with spaces.com").as_deref(),
            Some("not a url with spaces.com")
        );
        assert_eq!(
            resolve_playable_url("//cdn.example.com/a.mp4").as_deref(),
            Some("//cdn.example.com/a.mp4")
        );
        assert_eq!(
            resolve_playable_url("http://example.com").as_deref(),
            Some("http://example.com")
        );
        assert_eq!(rule_for("localhost"), Some("passthrough"));
    }

    #[test]
    fn test_rules_are_ordered() {
        let names: Vec<_> = RESOLVE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["iframe-src", "bare-youtube-id", "missing-scheme", "passthrough"]);
    }

    #[test]
    fn test_resolution_is_idempotent_for_urls() {
        for raw in ["example.com/v.mp4", "https://vimeo.com/1", "dQw4w9WgXcQ"] {
            let once = resolve_playable_url(raw).unwrap();
            assert_eq!(resolve_playable_url(&once).as_deref(), Some(once.as_str()));
        }
    }
}
