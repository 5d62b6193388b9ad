//! Handlers for `/admin/authors`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::content::{TAG_AUTHORS, TAG_POSTS};
use vitrine_core::error::CoreError;
use vitrine_core::media::{MediaKind, PREFIX_AUTHOR_AVATARS};
use vitrine_core::types::DbId;
use vitrine_core::validation::{
    normalize_optional, normalize_patch, patch_value, validate_optional, validate_required,
    BIO_MAX_LEN, NAME_MAX_LEN,
};
use vitrine_db::models::author::{Author, CreateAuthor, UpdateAuthor};
use vitrine_db::repositories::{AuthorRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::media::{discard_object, store_upload, UploadForm};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Author",
        id,
    })
}

/// Authors appear on post pages, so both tags go stale together.
async fn invalidate(state: &AppState) {
    state.cache.invalidate_many(&[TAG_AUTHORS, TAG_POSTS]).await;
}

/// GET /api/v1/admin/authors
pub async fn list_authors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let authors = AuthorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: authors }))
}

/// GET /api/v1/admin/authors/{id}
pub async fn get_author(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: author }))
}

/// POST /api/v1/admin/authors
pub async fn create_author(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateAuthor>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.bio = normalize_optional(input.bio);
    validate_required("Name", &input.name, NAME_MAX_LEN)?;
    validate_optional("Bio", input.bio.as_deref(), BIO_MAX_LEN)?;

    let author = AuthorRepo::create(&state.pool, &input).await?;
    invalidate(&state).await;

    tracing::info!(author_id = author.id, name = %author.name, "Author created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: author })))
}

/// PUT /api/v1/admin/authors/{id}
pub async fn update_author(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAuthor>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
        validate_required("Name", name, NAME_MAX_LEN)?;
    }
    input.bio = normalize_patch(input.bio);
    validate_optional("Bio", patch_value(&input.bio), BIO_MAX_LEN)?;

    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    invalidate(&state).await;

    tracing::info!(author_id = id, "Author updated");

    Ok(Json(DataResponse { data: author }))
}

/// DELETE /api/v1/admin/authors/{id}
///
/// Refused with 409 while any post references the author.
pub async fn delete_author(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post_count = PostRepo::count_by_author(&state.pool, id).await?;
    if post_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Author has {post_count} post(s); reassign or delete them first"
        ))));
    }

    let author = AuthorRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(key) = author.avatar_key.as_deref() {
        discard_object(&state, key).await;
    }
    invalidate(&state).await;

    tracing::info!(author_id = id, "Author deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/authors/{id}/avatar
///
/// Multipart form with a required image `file`.
pub async fn upload_avatar(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Author>>> {
    let existing = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let form = UploadForm::read(multipart).await?;
    let prefix = format!("{PREFIX_AUTHOR_AVATARS}/{id}");
    let stored = store_upload(&state, MediaKind::Image, &prefix, &form).await?;

    let author = AuthorRepo::set_avatar(&state.pool, id, Some(&stored.key))
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.avatar_key.as_deref() {
        if old != stored.key {
            discard_object(&state, old).await;
        }
    }
    invalidate(&state).await;

    tracing::info!(author_id = id, key = %stored.key, "Author avatar updated");

    Ok(Json(DataResponse { data: author }))
}

/// DELETE /api/v1/admin/authors/{id}/avatar
pub async fn delete_avatar(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Author>>> {
    let existing = AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let author = AuthorRepo::set_avatar(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.avatar_key.as_deref() {
        discard_object(&state, old).await;
    }
    invalidate(&state).await;

    tracing::info!(author_id = id, "Author avatar removed");

    Ok(Json(DataResponse { data: author }))
}
