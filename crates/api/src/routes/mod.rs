pub mod auth;
pub mod authors;
pub mod gallery;
pub mod health;
pub mod order;
pub mod posts;
pub mod site;
pub mod team;
pub mod testimonials;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/logout                                  logout
/// /auth/session                                 current session (requires session)
///
/// /admin/authors                                list, create
/// /admin/authors/{id}                           get, update, delete
/// /admin/authors/{id}/avatar                    upload, remove avatar
///
/// /admin/posts                                  list, create
/// /admin/posts/{id}                             get, update, delete
/// /admin/posts/{id}/publish                     publish (POST)
/// /admin/posts/{id}/unpublish                   unpublish (POST)
/// /admin/posts/{id}/cover                       upload, remove cover image
///
/// /admin/team                                   list, create
/// /admin/team/{id}                              get, update, delete
/// /admin/team/{id}/avatar                       upload, remove avatar
///
/// /admin/testimonials                           list, create
/// /admin/testimonials/{id}                      get, update, delete
///
/// /admin/gallery/{kind}                         list, upload
/// /admin/gallery/{kind}/{id}                    get, update caption, delete
/// /admin/gallery/{kind}/bulk-delete             delete many (POST)
///
/// /admin/order/{kind}                           get, replace order record
/// /admin/order/{kind}/items                     append id (POST)
/// /admin/order/{kind}/items/{id}                remove id (DELETE)
///
/// /site/authors                                 public author list
/// /site/posts                                   published posts
/// /site/posts/{slug}                            single published post
/// /site/team                                    ordered team
/// /site/testimonials                            testimonials
/// /site/gallery/{kind}                          ordered gallery
/// ```
///
/// Every `/admin` route requires an administrator session.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin/authors", authors::router())
        .nest("/admin/posts", posts::router())
        .nest("/admin/team", team::router())
        .nest("/admin/testimonials", testimonials::router())
        .nest("/admin/gallery/{kind}", gallery::router())
        .nest("/admin/order/{kind}", order::router())
        .nest("/site", site::router())
}
