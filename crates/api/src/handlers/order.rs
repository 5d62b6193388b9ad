//! Handlers for `/admin/order/{kind}`: direct editing of order records.
//!
//! `kind` is a content kind slug (`gallery-images`, `gallery-videos`,
//! `team-members`, `testimonials`). Records may name ids that no longer
//! exist; listings skip them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::content::ContentKind;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::{append_id, dedup_ids, remove_id, OrderStore};

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted item id.
const MAX_ID_LEN: usize = 64;

#[derive(Debug, Serialize)]
pub struct OrderRecordResponse {
    pub kind: ContentKind,
    pub namespace: &'static str,
    /// Whether public listings of this kind apply the record.
    pub overlay_enabled: bool,
    pub item_ids: Vec<String>,
}

/// Request body for `PUT /admin/order/{kind}`.
#[derive(Debug, Deserialize)]
pub struct ReplaceOrderRequest {
    pub item_ids: Vec<String>,
}

/// Request body for `POST /admin/order/{kind}/items`.
#[derive(Debug, Deserialize)]
pub struct AppendItemRequest {
    pub id: String,
}

fn store(state: &AppState) -> Result<&dyn OrderStore, CoreError> {
    state
        .order_store
        .as_deref()
        .ok_or_else(|| CoreError::StoreUnavailable {
            store: "order",
            message: "No order store is configured".into(),
        })
}

fn validate_item_id(id: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() || id.chars().count() > MAX_ID_LEN {
        return Err(CoreError::Validation(format!(
            "Item ids must be 1 to {MAX_ID_LEN} characters"
        )));
    }
    Ok(())
}

async fn record_response(
    state: &AppState,
    kind: ContentKind,
) -> AppResult<Json<DataResponse<OrderRecordResponse>>> {
    let item_ids = store(state)?.get_order(kind.namespace()).await?;
    Ok(Json(DataResponse {
        data: OrderRecordResponse {
            kind,
            namespace: kind.namespace(),
            overlay_enabled: state.config.ordering.overlay_enabled(kind),
            item_ids,
        },
    }))
}

/// GET /api/v1/admin/order/{kind}
pub async fn get_order(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<OrderRecordResponse>>> {
    let kind = ContentKind::from_slug(&kind)?;
    record_response(&state, kind).await
}

/// PUT /api/v1/admin/order/{kind}
///
/// Replace the whole record. Repeated ids keep their first position.
pub async fn replace_order(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<ReplaceOrderRequest>,
) -> AppResult<Json<DataResponse<OrderRecordResponse>>> {
    let kind = ContentKind::from_slug(&kind)?;
    let ids: Vec<String> = input
        .item_ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .collect();
    for id in &ids {
        validate_item_id(id)?;
    }
    let ids = dedup_ids(ids);

    store(&state)?.replace_order(kind.namespace(), &ids).await?;
    state.cache.invalidate(kind.cache_tag()).await;

    tracing::info!(
        kind = %kind,
        count = ids.len(),
        username = %admin.username,
        "Display order replaced",
    );

    record_response(&state, kind).await
}

/// POST /api/v1/admin/order/{kind}/items
///
/// Append an id to the end of the record. No-op if already present.
pub async fn append_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<AppendItemRequest>,
) -> AppResult<Json<DataResponse<OrderRecordResponse>>> {
    let kind = ContentKind::from_slug(&kind)?;
    let id = input.id.trim();
    validate_item_id(id)?;

    append_id(store(&state)?, kind.namespace(), id).await?;
    state.cache.invalidate(kind.cache_tag()).await;

    tracing::info!(kind = %kind, item_id = %id, "Item appended to display order");

    record_response(&state, kind).await
}

/// DELETE /api/v1/admin/order/{kind}/items/{id}
///
/// Remove the first occurrence of an id. Returns 204 even if it was absent.
pub async fn remove_item(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let kind = ContentKind::from_slug(&kind)?;

    remove_id(store(&state)?, kind.namespace(), &id).await?;
    state.cache.invalidate(kind.cache_tag()).await;

    tracing::info!(kind = %kind, item_id = %id, "Item removed from display order");

    Ok(StatusCode::NO_CONTENT)
}
