//! Content kinds that support a custom display order, plus the cache tags
//! used to invalidate public listings after admin mutations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Cache tags
// ---------------------------------------------------------------------------

pub const TAG_AUTHORS: &str = "authors";
pub const TAG_POSTS: &str = "posts";
pub const TAG_TEAM: &str = "team";
pub const TAG_TESTIMONIALS: &str = "testimonials";
pub const TAG_GALLERY_IMAGES: &str = "gallery-images";
pub const TAG_GALLERY_VIDEOS: &str = "gallery-videos";

// ---------------------------------------------------------------------------
// Content kinds
// ---------------------------------------------------------------------------

/// A list-type content kind whose display order may be overridden by an
/// administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "gallery-images")]
    GalleryImage,
    #[serde(rename = "gallery-videos")]
    GalleryVideo,
    #[serde(rename = "team-members")]
    TeamMember,
    #[serde(rename = "testimonials")]
    Testimonial,
}

impl ContentKind {
    /// Every orderable kind.
    pub const ALL: [ContentKind; 4] = [
        Self::GalleryImage,
        Self::GalleryVideo,
        Self::TeamMember,
        Self::Testimonial,
    ];

    /// Kinds that apply the custom order overlay when nothing is configured.
    ///
    /// Testimonials list purely by creation time.
    pub const DEFAULT_OVERLAY: [ContentKind; 3] =
        [Self::GalleryImage, Self::GalleryVideo, Self::TeamMember];

    /// Key of this kind's order record in the order store.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::GalleryImage => "gallery:images",
            Self::GalleryVideo => "gallery:videos",
            Self::TeamMember => "team:members",
            Self::Testimonial => "testimonials",
        }
    }

    /// Cache tag invalidated whenever an entity of this kind changes.
    pub fn cache_tag(self) -> &'static str {
        match self {
            Self::GalleryImage => TAG_GALLERY_IMAGES,
            Self::GalleryVideo => TAG_GALLERY_VIDEOS,
            Self::TeamMember => TAG_TEAM,
            Self::Testimonial => TAG_TESTIMONIALS,
        }
    }

    /// Stable identifier used in configuration and URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Self::GalleryImage => "gallery-images",
            Self::GalleryVideo => "gallery-videos",
            Self::TeamMember => "team-members",
            Self::Testimonial => "testimonials",
        }
    }

    /// Parse a kind from its [`slug`](Self::slug).
    pub fn from_slug(slug: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == slug)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown content kind '{slug}'. Must be one of: {}",
                    Self::ALL.map(|k| k.slug()).join(", ")
                ))
            })
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Parse a comma-separated list of kind slugs (e.g. from an env var).
///
/// Blank entries are skipped; duplicates are collapsed.
pub fn parse_kind_list(raw: &str) -> Result<Vec<ContentKind>, CoreError> {
    let mut kinds = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = ContentKind::from_slug(part)?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
