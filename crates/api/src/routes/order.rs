use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Display order routes mounted at `/admin/order/{kind}` where `kind` is a
/// content kind slug (`gallery-images`, `gallery-videos`, `team-members`,
/// `testimonials`).
///
/// ```text
/// GET    /              -> get_order
/// PUT    /              -> replace_order
/// POST   /items         -> append_item
/// DELETE /items/{id}    -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::get_order).put(order::replace_order))
        .route("/items", post(order::append_item))
        .route("/items/{id}", delete(order::remove_item))
}
