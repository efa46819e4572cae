//! Shared content types and the starter content constant.
//!
//! These types form the complete content document for a portfolio site.
//! They are serialized to JSON for the persisted snapshot, with camelCase
//! field names (`profileImg`) so snapshots stay readable as plain site data.
//!
//! Nothing here is aware of storage or editing — [`crate::store`] owns
//! persistence and [`crate::session`] owns mutation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The complete committed content document for the site.
///
/// Created at startup from the persisted snapshot if present and parseable,
/// otherwise from [`SiteData::starter`]. Replaced wholesale by a session
/// commit or a store reset — never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    /// Profile image: an external URL or an embedded `data:` encoding.
    /// Consumers must not assume either form.
    pub profile_img: String,
    /// Biography text, displayed as-is.
    pub bio: String,
    /// Career timeline in display order. No uniqueness constraint.
    pub career: Vec<CareerItem>,
    /// Gallery of works in display order. Ids are unique.
    pub works: Vec<WorkItem>,
}

/// One row of the career timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerItem {
    /// Free-form date or date range ("2021", "2022 — present").
    pub date: String,
    pub title: String,
    pub role: String,
}

/// One entry in the works gallery.
///
/// `img` and `url` use the empty string for "unset"; thumbnail resolution
/// ([`crate::thumbnail::resolve`]) derives a display image from whichever
/// fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique within `works` for the lifetime of a session and across commits.
    pub id: u64,
    pub title: String,
    /// External URL or embedded `data:` encoding. Empty = unset.
    pub img: String,
    /// Link to the work itself (project page, video). Empty = unset.
    pub url: String,
}

impl SiteData {
    /// Built-in starter content, used when no snapshot exists or the
    /// existing one cannot be read.
    pub fn starter() -> Self {
        Self {
            profile_img: String::new(),
            bio: "Hi, I design and build things for the web. This page is a small \
                  collection of what I've made."
                .to_string(),
            career: vec![
                CareerItem {
                    date: "2022 - present".to_string(),
                    title: "Independent".to_string(),
                    role: "Design & development".to_string(),
                },
                CareerItem {
                    date: "2019 - 2022".to_string(),
                    title: "Studio work".to_string(),
                    role: "Front-end developer".to_string(),
                },
            ],
            works: vec![WorkItem {
                id: 1,
                title: "First project".to_string(),
                img: String::new(),
                url: String::new(),
            }],
        }
    }
}

/// Editable fields of a [`CareerItem`], as named in the edit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerField {
    Date,
    Title,
    Role,
}

/// Editable fields of a [`WorkItem`]. The id is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkField {
    Title,
    Img,
    Url,
}

impl CareerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerField::Date => "date",
            CareerField::Title => "title",
            CareerField::Role => "role",
        }
    }
}

impl WorkField {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkField::Title => "title",
            WorkField::Img => "img",
            WorkField::Url => "url",
        }
    }
}

impl fmt::Display for CareerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WorkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized field names typed in the edit workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for CareerField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(CareerField::Date),
            "title" => Ok(CareerField::Title),
            "role" => Ok(CareerField::Role),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

impl FromStr for WorkField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(WorkField::Title),
            "img" => Ok(WorkField::Img),
            "url" => Ok(WorkField::Url),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Serialization shape
    // =========================================================================

    #[test]
    fn site_data_serializes_with_camel_case_keys() {
        let data = SiteData::starter();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"profileImg\""));
        assert!(!json.contains("\"profile_img\""));
    }

    #[test]
    fn site_data_roundtrips_through_json() {
        let data = SiteData::starter();
        let json = serde_json::to_string(&data).unwrap();
        let back: SiteData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn starter_work_ids_are_unique() {
        let data = SiteData::starter();
        let mut ids: Vec<u64> = data.works.iter().map(|w| w.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), data.works.len());
    }

    // =========================================================================
    // Field name parsing
    // =========================================================================

    #[test]
    fn career_field_parses_known_names() {
        assert_eq!("date".parse(), Ok(CareerField::Date));
        assert_eq!("title".parse(), Ok(CareerField::Title));
        assert_eq!("role".parse(), Ok(CareerField::Role));
    }

    #[test]
    fn work_field_parses_known_names() {
        assert_eq!("title".parse(), Ok(WorkField::Title));
        assert_eq!("img".parse(), Ok(WorkField::Img));
        assert_eq!("url".parse(), Ok(WorkField::Url));
    }

    #[test]
    fn unknown_field_names_are_rejected() {
        assert_eq!(
            "slug".parse::<WorkField>(),
            Err(UnknownField("slug".to_string()))
        );
        assert_eq!(
            "id".parse::<WorkField>(),
            Err(UnknownField("id".to_string()))
        );
        assert_eq!(
            "Date".parse::<CareerField>(),
            Err(UnknownField("Date".to_string()))
        );
    }

    #[test]
    fn field_display_matches_parse_names() {
        assert_eq!(CareerField::Role.to_string(), "role");
        assert_eq!(WorkField::Img.to_string(), "img");
    }
}
