//! Handlers for `/admin/testimonials`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::content::ContentKind;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_core::validation::{
    normalize_optional, normalize_patch, patch_value, validate_optional, validate_required,
    NAME_MAX_LEN, QUOTE_MAX_LEN, TITLE_MAX_LEN,
};
use vitrine_db::models::testimonial::{CreateTestimonial, UpdateTestimonial};
use vitrine_db::repositories::TestimonialRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::ordering::{list_ordered, prune_deleted};
use crate::response::DataResponse;
use crate::state::AppState;

const KIND: ContentKind = ContentKind::Testimonial;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Testimonial",
        id,
    })
}

/// GET /api/v1/admin/testimonials
pub async fn list_testimonials(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let canonical = TestimonialRepo::list(&state.pool).await?;
    let testimonials = list_ordered(&state, KIND, canonical).await;
    Ok(Json(DataResponse { data: testimonials }))
}

/// GET /api/v1/admin/testimonials/{id}
pub async fn get_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: testimonial }))
}

/// POST /api/v1/admin/testimonials
pub async fn create_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateTestimonial>,
) -> AppResult<impl IntoResponse> {
    input.quote = input.quote.trim().to_string();
    input.author_name = input.author_name.trim().to_string();
    input.author_title = normalize_optional(input.author_title);
    input.company = normalize_optional(input.company);
    validate_required("Quote", &input.quote, QUOTE_MAX_LEN)?;
    validate_required("Author name", &input.author_name, NAME_MAX_LEN)?;
    validate_optional("Author title", input.author_title.as_deref(), TITLE_MAX_LEN)?;
    validate_optional("Company", input.company.as_deref(), NAME_MAX_LEN)?;

    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(testimonial_id = testimonial.id, "Testimonial created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// PUT /api/v1/admin/testimonials/{id}
pub async fn update_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTestimonial>,
) -> AppResult<impl IntoResponse> {
    if let Some(quote) = input.quote.as_mut() {
        *quote = quote.trim().to_string();
        validate_required("Quote", quote, QUOTE_MAX_LEN)?;
    }
    if let Some(name) = input.author_name.as_mut() {
        *name = name.trim().to_string();
        validate_required("Author name", name, NAME_MAX_LEN)?;
    }
    input.author_title = normalize_patch(input.author_title);
    input.company = normalize_patch(input.company);
    validate_optional("Author title", patch_value(&input.author_title), TITLE_MAX_LEN)?;
    validate_optional("Company", patch_value(&input.company), NAME_MAX_LEN)?;

    let testimonial = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(testimonial_id = id, "Testimonial updated");

    Ok(Json(DataResponse { data: testimonial }))
}

/// DELETE /api/v1/admin/testimonials/{id}
pub async fn delete_testimonial(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TestimonialRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    prune_deleted(&state, KIND, &[id]).await;
    state.cache.invalidate(KIND.cache_tag()).await;

    tracing::info!(testimonial_id = id, "Testimonial deleted");

    Ok(StatusCode::NO_CONTENT)
}
