//! Video references: classification, resolution, player choice.
//!
//! - [`classify`] - is this a YouTube reference, a video file, or neither
//! - [`resolve`] - normalize free-text references into loadable URLs
//! - [`player`] - pick a native or embedded player for a reference
//!
//! Every function here is total: a reference that cannot be understood
//! yields `None` or is passed through, never an error.

pub mod classify;
pub mod player;
pub mod resolve;

pub use classify::{
    VideoFileType, extract_youtube_embed_url, extract_youtube_id, is_video_file, is_youtube_url,
};
pub use player::PlayerSource;
pub use resolve::{RESOLVE_RULES, ResolveRule, Resolved, resolve_playable_url, resolve_with_rule};
