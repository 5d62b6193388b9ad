//! Gallery media model and DTOs.
//!
//! Images and videos share the `gallery_items` table and are told apart by
//! `media_kind` (`image` / `video`). Each kind has its own display order.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::ordering::OrderKey;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub media_kind: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub media_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderKey for GalleryItem {
    fn order_key(&self) -> String {
        self.id.to_string()
    }
}

/// Insert payload built by the upload handler once the object is stored.
#[derive(Debug, Clone)]
pub struct CreateGalleryItem {
    pub media_kind: String,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub media_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// DTO for editing a gallery item's caption fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGalleryItem {
    #[serde(default, deserialize_with = "super::nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub alt_text: Option<Option<String>>,
}
