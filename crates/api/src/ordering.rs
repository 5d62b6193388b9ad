//! Ordered listing service.
//!
//! Applies the custom order overlay to canonical listings and prunes deleted
//! entities from order records. The order store is best effort from the
//! caller's point of view: a listing never fails because the store is down,
//! and a committed deletion is never reported as failed because pruning did.

use vitrine_core::content::ContentKind;
use vitrine_core::ordering::{merge, remove_id, OrderKey};
use vitrine_core::types::DbId;

use crate::state::AppState;

/// Apply the custom order for `kind` to `canonical` when the overlay is
/// enabled for that kind.
///
/// On an order store fault the canonical order is returned.
pub async fn list_ordered<T: OrderKey>(
    state: &AppState,
    kind: ContentKind,
    canonical: Vec<T>,
) -> Vec<T> {
    if !state.config.ordering.overlay_enabled(kind) {
        return canonical;
    }
    let Some(store) = state.order_store.as_deref() else {
        return canonical;
    };

    match store.get_order(kind.namespace()).await {
        Ok(order) => merge(canonical, Some(&order)),
        Err(e) => {
            tracing::warn!(
                kind = %kind,
                error = %e,
                "Order store unavailable; falling back to canonical order",
            );
            canonical
        }
    }
}

/// Remove deleted entity ids from the order record for `kind`.
///
/// Each removal is independent; failures are logged and skipped.
pub async fn prune_deleted(state: &AppState, kind: ContentKind, ids: &[DbId]) {
    let Some(store) = state.order_store.as_deref() else {
        return;
    };

    for id in ids {
        if let Err(e) = remove_id(store, kind.namespace(), &id.to_string()).await {
            tracing::warn!(
                kind = %kind,
                item_id = id,
                error = %e,
                "Failed to prune deleted item from order record",
            );
        }
    }
}
