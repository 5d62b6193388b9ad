//! Handlers for `/admin/gallery/{kind}` where `kind` is `images` or `videos`.
//!
//! Uploads are content-addressed: re-uploading an identical file is
//! rejected with 409 rather than stored twice.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;
use vitrine_core::media::MediaKind;
use vitrine_core::types::DbId;
use vitrine_core::validation::{
    normalize_patch, patch_value, validate_optional, ALT_TEXT_MAX_LEN, TITLE_MAX_LEN,
};
use vitrine_db::models::gallery_item::{CreateGalleryItem, UpdateGalleryItem};
use vitrine_db::repositories::GalleryItemRepo;

use crate::error::{AppError, AppResult};
use crate::media::{discard_object, prepare_upload, put_upload, UploadForm};
use crate::middleware::auth::RequireAdmin;
use crate::ordering::{list_ordered, prune_deleted};
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest number of ids accepted by one bulk delete.
const MAX_BULK_DELETE: usize = 500;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GalleryItem",
        id,
    })
}

/// Request body for `POST /admin/gallery/{kind}/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    /// Ids that existed and were deleted, in request order.
    pub deleted_ids: Vec<DbId>,
}

fn validate_captions(title: Option<&str>, alt_text: Option<&str>) -> Result<(), CoreError> {
    validate_optional("Title", title, TITLE_MAX_LEN)?;
    validate_optional("Alt text", alt_text, ALT_TEXT_MAX_LEN)
}

/// GET /api/v1/admin/gallery/{kind}
pub async fn list_items(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = MediaKind::from_name(&kind)?;
    let canonical = GalleryItemRepo::list_by_kind(&state.pool, kind).await?;
    let items = list_ordered(&state, kind.content_kind(), canonical).await;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/gallery/{kind}/{id}
pub async fn get_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let kind = MediaKind::from_name(&kind)?;
    let item = GalleryItemRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/gallery/{kind}
///
/// Multipart form: required `file`, optional `title` and `alt_text`.
pub async fn upload_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let kind = MediaKind::from_name(&kind)?;
    let form = UploadForm::read(multipart).await?;
    let title = form.field("title");
    let alt_text = form.field("alt_text");
    validate_captions(title.as_deref(), alt_text.as_deref())?;

    let stored = prepare_upload(&state, kind, kind.gallery_prefix(), &form)?;

    if let Some(existing) = GalleryItemRepo::find_by_media_key(&state.pool, &stored.key).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "This file is already in the gallery as item {}",
            existing.id
        ))));
    }
    put_upload(&state, &stored, &form).await?;

    let input = CreateGalleryItem {
        media_kind: kind.as_str().to_string(),
        title,
        alt_text,
        media_key: stored.key.clone(),
        content_type: stored.content_type.to_string(),
        size_bytes: stored.size_bytes,
        width: stored.width,
        height: stored.height,
    };

    let item = match GalleryItemRepo::create(&state.pool, &input).await {
        Ok(item) => item,
        Err(e) => {
            // A concurrent upload of the same file owns the object now.
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
            );
            if !duplicate {
                discard_object(&state, &stored.key).await;
            }
            return Err(e.into());
        }
    };
    state.cache.invalidate(kind.content_kind().cache_tag()).await;

    tracing::info!(
        item_id = item.id,
        kind = %kind,
        key = %item.media_key,
        size_bytes = item.size_bytes,
        "Gallery item uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/gallery/{kind}/{id}
///
/// Update captions. The media itself is immutable; upload a new item instead.
pub async fn update_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(mut input): Json<UpdateGalleryItem>,
) -> AppResult<impl IntoResponse> {
    let kind = MediaKind::from_name(&kind)?;
    input.title = normalize_patch(input.title);
    input.alt_text = normalize_patch(input.alt_text);
    validate_captions(patch_value(&input.title), patch_value(&input.alt_text))?;

    let item = GalleryItemRepo::update(&state.pool, kind, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(kind.content_kind().cache_tag()).await;

    tracing::info!(item_id = id, kind = %kind, "Gallery item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/gallery/{kind}/{id}
///
/// Deletes the row, then the stored object, then prunes the order record.
pub async fn delete_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = MediaKind::from_name(&kind)?;
    let item = GalleryItemRepo::delete(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    discard_object(&state, &item.media_key).await;
    prune_deleted(&state, kind.content_kind(), &[id]).await;
    state.cache.invalidate(kind.content_kind().cache_tag()).await;

    tracing::info!(item_id = id, kind = %kind, "Gallery item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/gallery/{kind}/bulk-delete
///
/// Ids that do not exist (or belong to the other kind) are skipped.
pub async fn bulk_delete_items(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<DataResponse<BulkDeleteResponse>>> {
    let kind = MediaKind::from_name(&kind)?;
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "ids must not be empty".into(),
        )));
    }
    if input.ids.len() > MAX_BULK_DELETE {
        return Err(AppError::Core(CoreError::Validation(format!(
            "At most {MAX_BULK_DELETE} items can be deleted at once"
        ))));
    }

    let deleted = GalleryItemRepo::delete_many(&state.pool, kind, &input.ids).await?;

    let deleted_ids: Vec<DbId> = input
        .ids
        .iter()
        .copied()
        .filter(|id| deleted.iter().any(|item| item.id == *id))
        .fold(Vec::new(), |mut acc, id| {
            if !acc.contains(&id) {
                acc.push(id);
            }
            acc
        });

    for item in &deleted {
        discard_object(&state, &item.media_key).await;
    }
    prune_deleted(&state, kind.content_kind(), &deleted_ids).await;
    state.cache.invalidate(kind.content_kind().cache_tag()).await;

    tracing::info!(
        kind = %kind,
        requested = input.ids.len(),
        deleted = deleted_ids.len(),
        "Gallery items bulk deleted",
    );

    Ok(Json(DataResponse {
        data: BulkDeleteResponse { deleted_ids },
    }))
}
