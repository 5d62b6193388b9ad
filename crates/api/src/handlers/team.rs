//! Handlers for `/admin/team`.
//!
//! Team listings honour the custom display order; deleting a member prunes
//! it from the order record.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::content::ContentKind;
use vitrine_core::error::CoreError;
use vitrine_core::media::{MediaKind, PREFIX_TEAM_AVATARS};
use vitrine_core::types::DbId;
use vitrine_core::validation::{
    normalize_optional, normalize_patch, patch_value, validate_optional,
    validate_optional_url, validate_required, BIO_MAX_LEN, NAME_MAX_LEN, TITLE_MAX_LEN,
};
use vitrine_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use vitrine_db::repositories::TeamMemberRepo;

use crate::error::{AppError, AppResult};
use crate::media::{discard_object, store_upload, UploadForm};
use crate::middleware::auth::RequireAdmin;
use crate::ordering::{list_ordered, prune_deleted};
use crate::response::DataResponse;
use crate::state::AppState;

const KIND: ContentKind = ContentKind::TeamMember;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TeamMember",
        id,
    })
}

/// GET /api/v1/admin/team
pub async fn list_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let canonical = TeamMemberRepo::list(&state.pool).await?;
    let members = list_ordered(&state, KIND, canonical).await;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/admin/team/{id}
pub async fn get_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: member }))
}

/// POST /api/v1/admin/team
///
/// New members are not added to the order record; they list after every
/// explicitly placed member.
pub async fn create_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.role_title = input.role_title.trim().to_string();
    input.bio = normalize_optional(input.bio);
    input.profile_url = normalize_optional(input.profile_url);
    validate_required("Name", &input.name, NAME_MAX_LEN)?;
    validate_required("Role", &input.role_title, TITLE_MAX_LEN)?;
    validate_optional("Bio", input.bio.as_deref(), BIO_MAX_LEN)?;
    validate_optional_url("Profile URL", input.profile_url.as_deref())?;

    let member = TeamMemberRepo::create(&state.pool, &input).await?;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(member_id = member.id, name = %member.name, "Team member created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/admin/team/{id}
pub async fn update_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTeamMember>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
        validate_required("Name", name, NAME_MAX_LEN)?;
    }
    if let Some(role) = input.role_title.as_mut() {
        *role = role.trim().to_string();
        validate_required("Role", role, TITLE_MAX_LEN)?;
    }
    input.bio = normalize_patch(input.bio);
    input.profile_url = normalize_patch(input.profile_url);
    validate_optional("Bio", patch_value(&input.bio), BIO_MAX_LEN)?;
    validate_optional_url("Profile URL", patch_value(&input.profile_url))?;

    let member = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(member_id = id, "Team member updated");

    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/team/{id}
pub async fn delete_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let member = TeamMemberRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(key) = member.avatar_key.as_deref() {
        discard_object(&state, key).await;
    }
    prune_deleted(&state, KIND, &[id]).await;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(member_id = id, "Team member deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/team/{id}/avatar
///
/// Multipart form with a required image `file`.
pub async fn upload_avatar(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let existing = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let form = UploadForm::read(multipart).await?;
    let prefix = format!("{PREFIX_TEAM_AVATARS}/{id}");
    let stored = store_upload(&state, MediaKind::Image, &prefix, &form).await?;

    let member = TeamMemberRepo::set_avatar(&state.pool, id, Some(&stored.key))
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.avatar_key.as_deref() {
        if old != stored.key {
            discard_object(&state, old).await;
        }
    }
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(member_id = id, key = %stored.key, "Team member avatar updated");

    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/admin/team/{id}/avatar
pub async fn delete_avatar(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let existing = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let member = TeamMemberRepo::set_avatar(&state.pool, id, None)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old) = existing.avatar_key.as_deref() {
        discard_object(&state, old).await;
    }
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(member_id = id, "Team member avatar removed");

    Ok(Json(DataResponse { data: member }))
}
