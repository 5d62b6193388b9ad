//! Uploaded media rules: accepted formats, object key layout, and image
//! dimension probing.

use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::content::ContentKind;
use crate::error::CoreError;
use crate::hashing::sha256_hex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Object key prefix for gallery images.
pub const PREFIX_GALLERY_IMAGES: &str = "gallery/images";
/// Object key prefix for gallery videos.
pub const PREFIX_GALLERY_VIDEOS: &str = "gallery/videos";
/// Object key prefix for author avatars.
pub const PREFIX_AUTHOR_AVATARS: &str = "avatars/authors";
/// Object key prefix for team member avatars.
pub const PREFIX_TEAM_AVATARS: &str = "avatars/team";
/// Object key prefix for blog post cover images.
pub const PREFIX_POST_COVERS: &str = "posts/covers";

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
];

const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
];

// ---------------------------------------------------------------------------
// Media kind
// ---------------------------------------------------------------------------

/// Whether an uploaded object is a still image or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Database `media_kind` column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Parse from the `media_kind` column or the `/gallery/{kind}` path segment
    /// (singular or plural).
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "image" | "images" => Ok(Self::Image),
            "video" | "videos" => Ok(Self::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media kind '{other}'. Must be one of: images, videos"
            ))),
        }
    }

    /// The orderable content kind for gallery items of this media kind.
    pub fn content_kind(self) -> ContentKind {
        match self {
            Self::Image => ContentKind::GalleryImage,
            Self::Video => ContentKind::GalleryVideo,
        }
    }

    /// Object key prefix for gallery uploads of this kind.
    pub fn gallery_prefix(self) -> &'static str {
        match self {
            Self::Image => PREFIX_GALLERY_IMAGES,
            Self::Video => PREFIX_GALLERY_VIDEOS,
        }
    }

    fn accepted(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Image => IMAGE_TYPES,
            Self::Video => VIDEO_TYPES,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Upload validation
// ---------------------------------------------------------------------------

/// An upload that passed format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpload {
    /// Lowercased file extension without the dot.
    pub extension: String,
    /// Content type derived from the extension.
    pub content_type: &'static str,
}

/// Check an uploaded file's name and size against the rules for `kind`.
///
/// The content type is derived from the extension; the client-declared type
/// is not trusted.
pub fn accept_upload(
    kind: MediaKind,
    filename: &str,
    size_bytes: usize,
    max_bytes: usize,
) -> Result<AcceptedUpload, CoreError> {
    if size_bytes == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {size_bytes} bytes; the limit is {max_bytes} bytes"
        )));
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let content_type = kind
        .accepted()
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, ct)| *ct)
        .ok_or_else(|| {
            let supported: Vec<&str> = kind.accepted().iter().map(|(ext, _)| *ext).collect();
            CoreError::Validation(format!(
                "Unsupported {kind} format '.{extension}'. Supported: {}",
                supported.join(", ")
            ))
        })?;

    Ok(AcceptedUpload {
        extension,
        content_type,
    })
}

/// Content-addressed object key: `{prefix}/{sha256}.{ext}`.
///
/// Identical uploads map to the same key.
pub fn object_key(prefix: &str, data: &[u8], extension: &str) -> String {
    format!("{prefix}/{}.{extension}", sha256_hex(data))
}

/// Read pixel dimensions from an image header without decoding the body.
///
/// Returns `None` for formats the probe does not understand or corrupt data.
pub fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const MAX: usize = 1024;

    /// Smallest valid PNG: 1x1 transparent pixel.
    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn accepts_known_image_extension_case_insensitively() {
        let accepted = accept_upload(MediaKind::Image, "Team Photo.JPG", 10, MAX).unwrap();
        assert_eq!(accepted.extension, "jpg");
        assert_eq!(accepted.content_type, "image/jpeg");
    }

    #[test]
    fn rejects_video_in_image_gallery() {
        assert_matches!(
            accept_upload(MediaKind::Image, "clip.mp4", 10, MAX),
            Err(CoreError::Validation(msg)) if msg.contains("Unsupported image format '.mp4'")
        );
    }

    #[test]
    fn accepts_quicktime_video() {
        let accepted = accept_upload(MediaKind::Video, "reel.mov", 10, MAX).unwrap();
        assert_eq!(accepted.content_type, "video/quicktime");
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(accept_upload(MediaKind::Video, "reel", 10, MAX).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        assert!(accept_upload(MediaKind::Image, "a.png", 0, MAX).is_err());
        assert!(accept_upload(MediaKind::Image, "a.png", MAX + 1, MAX).is_err());
        assert!(accept_upload(MediaKind::Image, "a.png", MAX, MAX).is_ok());
    }

    #[test]
    fn object_key_is_content_addressed() {
        let a = object_key(PREFIX_GALLERY_IMAGES, b"same", "png");
        let b = object_key(PREFIX_GALLERY_IMAGES, b"same", "png");
        let c = object_key(PREFIX_GALLERY_IMAGES, b"other", "png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("gallery/images/"));
        assert!(a.ends_with(".png"));
    }

    #[test]
    fn media_kind_parses_path_segments() {
        assert_eq!(MediaKind::from_name("images").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_name("video").unwrap(), MediaKind::Video);
        assert!(MediaKind::from_name("audio").is_err());
    }

    #[test]
    fn media_kind_maps_to_gallery_content_kind() {
        assert_eq!(MediaKind::Image.content_kind(), ContentKind::GalleryImage);
        assert_eq!(MediaKind::Video.content_kind(), ContentKind::GalleryVideo);
    }

    #[test]
    fn probes_png_dimensions() {
        assert_eq!(image_dimensions(PNG_1X1), Some((1, 1)));
    }

    #[test]
    fn garbage_has_no_dimensions() {
        assert_eq!(image_dimensions(b"definitely not an image"), None);
    }
}
