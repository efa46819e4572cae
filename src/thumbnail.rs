//! Display thumbnail resolution for work items.
//!
//! A work entry rarely carries a complete set of images, so the gallery
//! derives a display thumbnail from whatever is present. The chain, first
//! match wins:
//!
//! 1. `img` set → use it verbatim (external URL or embedded encoding)
//! 2. `url` is a recognizable video link → canonical thumbnail for the video
//! 3. otherwise → the generic placeholder
//!
//! Resolution only constructs strings. It never fetches anything and never
//! verifies the thumbnail exists; a work item with a dead video link still
//! resolves to a well-formed thumbnail URL.

use crate::types::WorkItem;
use regex::Regex;
use std::sync::LazyLock;

/// Fallback shown when a work has neither an image nor a usable video link.
pub const PLACEHOLDER: &str = "assets/placeholder.svg";

/// Video ids are exactly 11 characters of this alphabet. A candidate of any
/// other length means the URL only looked like a video link.
const VIDEO_ID_LEN: usize = 11;

static RE_SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").unwrap());
static RE_EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]+)").unwrap());
static RE_WATCH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]+)").unwrap());

/// Resolve the display image reference for a work item.
pub fn resolve(work: &WorkItem) -> String {
    if !work.img.is_empty() {
        return work.img.clone();
    }
    if let Some(id) = extract_video_id(&work.url) {
        return video_thumbnail_url(id);
    }
    PLACEHOLDER.to_string()
}

/// Extract an 11-character video id from a URL.
///
/// Recognized shapes, tried in order:
/// - short link: `youtu.be/<id>`
/// - embed: `youtube.com/embed/<id>`
/// - watch parameter: `v=<id>` in the query string
///
/// A shape whose candidate is not exactly 11 characters is a non-match and
/// the remaining shapes are still tried.
pub fn extract_video_id(url: &str) -> Option<&str> {
    [&RE_SHORT_LINK, &RE_EMBED, &RE_WATCH_PARAM]
        .iter()
        .filter_map(|re| re.captures(url))
        .map(|caps| caps.get(1).unwrap().as_str())
        .find(|candidate| candidate.len() == VIDEO_ID_LEN)
}

/// Canonical thumbnail URL for a video id.
pub fn video_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")
}
