//! Handlers for `/admin/posts`.
//!
//! Posts are drafts until published. Slugs are generated from the title when
//! the client does not supply one and must be unique across all posts.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::content::TAG_POSTS;
use vitrine_core::error::CoreError;
use vitrine_core::media::{MediaKind, PREFIX_POST_COVERS};
use vitrine_core::types::DbId;
use vitrine_core::validation::{
    generate_slug, normalize_optional, normalize_patch, patch_value, validate_optional,
    validate_required, validate_slug, BODY_MAX_LEN, EXCERPT_MAX_LEN, TITLE_MAX_LEN,
};
use vitrine_db::models::post::{CreatePost, Post, UpdatePost};
use vitrine_db::repositories::{AuthorRepo, PostRepo};

use crate::error::{AppError, AppResult};
use crate::media::{discard_object, store_upload, UploadForm};
use crate::middleware::auth::RequireAdmin;
use crate::query::PostListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Post", id })
}

async fn ensure_author_exists(state: &AppState, author_id: DbId) -> AppResult<()> {
    if AuthorRepo::find_by_id(&state.pool, author_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Author {author_id} does not exist"
        ))));
    }
    Ok(())
}

/// Validate a slug and make sure no other post uses it.
async fn ensure_slug_available(
    state: &AppState,
    slug: &str,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    validate_slug(slug)?;
    if PostRepo::slug_exists(&state.pool, slug, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Slug '{slug}' is already in use"
        ))));
    }
    Ok(())
}

/// GET /api/v1/admin/posts
///
/// Drafts included, newest first. Optional `?author_id=&limit=&offset=`.
pub async fn list_posts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.pagination().resolve();
    let posts = PostRepo::list(&state.pool, params.author_id, limit, offset).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/admin/posts/{id}
pub async fn get_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/posts
pub async fn create_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    input.title = input.title.trim().to_string();
    input.excerpt = normalize_optional(input.excerpt);
    validate_required("Title", &input.title, TITLE_MAX_LEN)?;
    validate_required("Body", &input.body, BODY_MAX_LEN)?;
    validate_optional("Excerpt", input.excerpt.as_deref(), EXCERPT_MAX_LEN)?;
    ensure_author_exists(&state, input.author_id).await?;

    let slug = match normalize_optional(input.slug.take()) {
        Some(slug) => slug,
        None => generate_slug(&input.title),
    };
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must contain letters or digits to generate a slug; supply one explicitly"
                .into(),
        )));
    }
    ensure_slug_available(&state, &slug, None).await?;

    let post = PostRepo::create(&state.pool, &input, &slug).await?;
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(
        post_id = post.id,
        slug = %post.slug,
        published = post.is_published(),
        "Post created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/admin/posts/{id}
///
/// Changing the title keeps the existing slug unless a new one is supplied.
pub async fn update_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_mut() {
        *title = title.trim().to_string();
        validate_required("Title", title, TITLE_MAX_LEN)?;
    }
    if let Some(body) = input.body.as_deref() {
        validate_required("Body", body, BODY_MAX_LEN)?;
    }
    input.excerpt = normalize_patch(input.excerpt);
    validate_optional("Excerpt", patch_value(&input.excerpt), EXCERPT_MAX_LEN)?;
    if let Some(author_id) = input.author_id {
        ensure_author_exists(&state, author_id).await?;
    }

    let slug = normalize_optional(input.slug.take());
    if let Some(slug) = slug.as_deref() {
        ensure_slug_available(&state, slug, Some(id)).await?;
    }

    let post = PostRepo::update(&state.pool, id, &input, slug.as_deref())
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, "Post updated");

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/posts/{id}/publish
pub async fn publish_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::publish(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, slug = %post.slug, "Post published");

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/admin/posts/{id}/unpublish
pub async fn unpublish_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::unpublish(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, "Post unpublished");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/admin/posts/{id}
pub async fn delete_post(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = PostRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(key) = post.cover_key.as_deref() {
        discard_object(&state, key).await;
    }
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, slug = %post.slug, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/posts/{id}/cover
///
/// Multipart form with a required image `file`.
pub async fn upload_cover(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Post>>> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let form = UploadForm::read(multipart).await?;
    let prefix = format!("{PREFIX_POST_COVERS}/{id}");
    let stored = store_upload(&state, MediaKind::Image, &prefix, &form).await?;

    let post = PostRepo::set_cover(&state.pool, id, Some(&stored.key))
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.cover_key.as_deref() {
        if old != stored.key {
            discard_object(&state, old).await;
        }
    }
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, key = %stored.key, "Post cover updated");

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/admin/posts/{id}/cover
pub async fn delete_cover(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let post = PostRepo::set_cover(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.cover_key.as_deref() {
        discard_object(&state, old).await;
    }
    state.cache.invalidate(TAG_POSTS).await;

    tracing::info!(post_id = id, "Post cover removed");

    Ok(Json(DataResponse { data: post }))
}
