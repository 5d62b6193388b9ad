//! Repository for the `gallery_items` table.

use sqlx::PgPool;
use vitrine_core::media::MediaKind;
use vitrine_core::types::DbId;

use crate::models::gallery_item::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use crate::models::patch_parts;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, media_kind, title, alt_text, media_key, content_type, \
                       size_bytes, width, height, created_at, updated_at";

/// Provides CRUD operations for gallery images and videos.
pub struct GalleryItemRepo;

impl GalleryItemRepo {
    /// Insert a new gallery item, returning the created row.
    ///
    /// Uploading the same bytes twice fails on `uq_gallery_items_media_key`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_items
                (media_kind, title, alt_text, media_key, content_type, size_bytes, width, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.media_kind)
            .bind(&input.title)
            .bind(&input.alt_text)
            .bind(&input.media_key)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    /// Find a gallery item of the given kind by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: MediaKind,
        id: DbId,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1 AND media_kind = $2");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find the item stored under an object key, if any.
    pub async fn find_by_media_key(
        pool: &PgPool,
        media_key: &str,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE media_key = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(media_key)
            .fetch_optional(pool)
            .await
    }

    /// Canonical listing for one media kind: most recently created first.
    pub async fn list_by_kind(
        pool: &PgPool,
        kind: MediaKind,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_items
             WHERE media_kind = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update caption fields. `Some(None)` clears a caption.
    pub async fn update(
        pool: &PgPool,
        kind: MediaKind,
        id: DbId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let (title_provided, title) = patch_parts(&input.title);
        let (alt_provided, alt_text) = patch_parts(&input.alt_text);
        let query = format!(
            "UPDATE gallery_items SET
                title = CASE WHEN $3 THEN $4 ELSE title END,
                alt_text = CASE WHEN $5 THEN $6 ELSE alt_text END
             WHERE id = $1 AND media_kind = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(kind.as_str())
            .bind(title_provided)
            .bind(title)
            .bind(alt_provided)
            .bind(alt_text)
            .fetch_optional(pool)
            .await
    }

    /// Delete one item, returning the deleted row so the caller can remove
    /// its object.
    pub async fn delete(
        pool: &PgPool,
        kind: MediaKind,
        id: DbId,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "DELETE FROM gallery_items WHERE id = $1 AND media_kind = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete several items of one kind. Ids that do not exist are skipped.
    pub async fn delete_many(
        pool: &PgPool,
        kind: MediaKind,
        ids: &[DbId],
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "DELETE FROM gallery_items
             WHERE id = ANY($1) AND media_kind = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(ids)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }
}
