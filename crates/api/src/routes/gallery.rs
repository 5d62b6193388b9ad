use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Gallery routes mounted at `/admin/gallery/{kind}` where `kind` is
/// `images` or `videos`.
///
/// ```text
/// GET    /              -> list_items (custom order applied)
/// POST   /              -> upload_item (multipart)
/// GET    /{id}          -> get_item
/// PUT    /{id}          -> update_item
/// DELETE /{id}          -> delete_item
/// POST   /bulk-delete   -> bulk_delete_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_items).post(gallery::upload_item))
        .route("/bulk-delete", post(gallery::bulk_delete_items))
        .route(
            "/{id}",
            get(gallery::get_item)
                .put(gallery::update_item)
                .delete(gallery::delete_item),
        )
}
