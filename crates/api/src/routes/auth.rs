use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Session routes mounted at `/auth`.
///
/// ```text
/// POST /login    -> login (public)
/// POST /logout   -> logout
/// GET  /session  -> current_session (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::current_session))
}
