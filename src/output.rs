//! CLI output formatting.
//!
//! Output is information-centric: every entity shows its semantic identity
//! first — positional index plus title — with secondary context on indented
//! lines. Image values are summarized rather than dumped, since an embedded
//! encoding is kilobytes of base64 nobody wants in a terminal.
//!
//! ```text
//! Profile
//!     Image: embedded image (image/png)
//! Bio
//!     Hi - I design and build things for the web.
//!
//! Career
//! 001 2022 - present  Independent
//!     Role: Design & development
//!
//! Works
//! 001 First project (id 1)
//!     Thumbnail: assets/placeholder.svg
//! ```
//!
//! Formatting is separated from printing so tests can assert on lines.

use crate::store::LoadOutcome;
use crate::thumbnail;
use crate::types::SiteData;
use std::path::Path;

/// Header line for an indexed entity: `001 Title`.
fn entity_header(index: usize, title: &str) -> String {
    format!("{:03} {}", index + 1, title)
}

/// Human summary of an image field value.
///
/// Embedded encodings are reported by their media type instead of being
/// echoed; URLs pass through; empty means unset.
pub fn describe_image(value: &str) -> String {
    if value.is_empty() {
        return "(none)".to_string();
    }
    match value.strip_prefix("data:").and_then(|rest| rest.split_once(';')) {
        Some((mime, _)) => format!("embedded image ({mime})"),
        None => value.to_string(),
    }
}

/// Render the full content inventory.
pub fn format_site(data: &SiteData) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Profile".to_string());
    lines.push(format!("    Image: {}", describe_image(&data.profile_img)));
    lines.push("Bio".to_string());
    lines.push(format!("    {}", data.bio));
    lines.push(String::new());

    lines.push("Career".to_string());
    for (i, item) in data.career.iter().enumerate() {
        lines.push(entity_header(i, &format!("{}  {}", item.date, item.title)));
        lines.push(format!("    Role: {}", item.role));
    }
    lines.push(String::new());

    lines.push("Works".to_string());
    for (i, work) in data.works.iter().enumerate() {
        let title = if work.title.is_empty() {
            "(untitled)"
        } else {
            work.title.as_str()
        };
        lines.push(entity_header(i, &format!("{} (id {})", title, work.id)));
        lines.push(format!(
            "    Thumbnail: {}",
            describe_image(&thumbnail::resolve(work))
        ));
        if !work.url.is_empty() {
            lines.push(format!("    Link: {}", work.url));
        }
    }

    lines
}

pub fn print_site(data: &SiteData) {
    for line in format_site(data) {
        println!("{line}");
    }
}

/// Print the load diagnostic when starting from anything but a clean
/// snapshot. A clean load stays quiet.
pub fn print_load_outcome(outcome: &LoadOutcome, snapshot_path: &Path) {
    match outcome {
        LoadOutcome::Loaded => {}
        LoadOutcome::Missing => println!("Note: {outcome}"),
        LoadOutcome::Corrupt(_) | LoadOutcome::VersionMismatch(_) => {
            println!("Warning: {outcome}");
            println!("    Snapshot: {}", snapshot_path.display());
        }
    }
}
