use axum::routing::{get, post};
use axum::Router;

use crate::handlers::authors;
use crate::state::AppState;

/// Author routes mounted at `/admin/authors`.
///
/// ```text
/// GET    /              -> list_authors
/// POST   /              -> create_author
/// GET    /{id}          -> get_author
/// PUT    /{id}          -> update_author
/// DELETE /{id}          -> delete_author
/// POST   /{id}/avatar   -> upload_avatar (multipart)
/// DELETE /{id}/avatar   -> delete_avatar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(authors::list_authors).post(authors::create_author))
        .route(
            "/{id}",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route(
            "/{id}/avatar",
            post(authors::upload_avatar).delete(authors::delete_avatar),
        )
}
