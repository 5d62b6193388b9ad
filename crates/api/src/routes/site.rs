use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Public read routes mounted at `/site`. No session required.
///
/// ```text
/// GET /authors          -> list_authors
/// GET /posts            -> list_posts (published only; limit, offset)
/// GET /posts/{slug}     -> get_post
/// GET /team             -> list_team
/// GET /testimonials     -> list_testimonials
/// GET /gallery/{kind}   -> list_gallery
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(site::list_authors))
        .route("/posts", get(site::list_posts))
        .route("/posts/{slug}", get(site::get_post))
        .route("/team", get(site::list_team))
        .route("/testimonials", get(site::list_testimonials))
        .route("/gallery/{kind}", get(site::list_gallery))
}
