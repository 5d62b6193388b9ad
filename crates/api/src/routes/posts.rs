use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Blog post routes mounted at `/admin/posts`.
///
/// ```text
/// GET    /                 -> list_posts (?author_id, limit, offset)
/// POST   /                 -> create_post
/// GET    /{id}             -> get_post
/// PUT    /{id}             -> update_post
/// DELETE /{id}             -> delete_post
/// POST   /{id}/publish     -> publish_post
/// POST   /{id}/unpublish   -> unpublish_post
/// POST   /{id}/cover       -> upload_cover (multipart)
/// DELETE /{id}/cover       -> delete_cover
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/publish", post(posts::publish_post))
        .route("/{id}/unpublish", post(posts::unpublish_post))
        .route(
            "/{id}/cover",
            post(posts::upload_cover).delete(posts::delete_cover),
        )
}
