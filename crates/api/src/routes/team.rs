use axum::routing::{get, post};
use axum::Router;

use crate::handlers::team;
use crate::state::AppState;

/// Team member routes mounted at `/admin/team`.
///
/// ```text
/// GET    /              -> list_members (custom order applied)
/// POST   /              -> create_member
/// GET    /{id}          -> get_member
/// PUT    /{id}          -> update_member
/// DELETE /{id}          -> delete_member
/// POST   /{id}/avatar   -> upload_avatar (multipart)
/// DELETE /{id}/avatar   -> delete_avatar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(team::list_members).post(team::create_member))
        .route(
            "/{id}",
            get(team::get_member)
                .put(team::update_member)
                .delete(team::delete_member),
        )
        .route(
            "/{id}/avatar",
            post(team::upload_avatar).delete(team::delete_avatar),
        )
}
