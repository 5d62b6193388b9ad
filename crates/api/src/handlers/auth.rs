//! Handlers for the `/auth` resource (login, logout, session).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;

use crate::auth::session::{
    check_credentials, clear_session_cookie, generate_session_token, session_cookie, LoginCheck,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session info returned by login and `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub username: String,
    /// Expiry as a UTC Unix timestamp.
    pub expires_at: i64,
}

/// Login response. The token is also set as the session cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the administrator credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let session = &state.config.session;
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let check = check_credentials(session, &input.username, &input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    match check {
        LoginCheck::Valid => {}
        LoginCheck::UnknownUser => {
            tracing::warn!(username = %input.username, "Login attempt for unknown user");
            return Err(invalid());
        }
        LoginCheck::WrongPassword => {
            tracing::warn!(username = %input.username, "Login attempt with wrong password");
            return Err(invalid());
        }
    }

    let (token, claims) = generate_session_token(&input.username, session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(username = %claims.sub, "Administrator signed in");

    let cookie = session_cookie(&token, session);
    let body = LoginResponse {
        token,
        session: SessionInfo {
            username: claims.sub,
            expires_at: claims.exp,
        },
    };

    Ok(([(SET_COOKIE, cookie)], Json(DataResponse { data: body })))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookie. Returns 204 whether or not a session existed.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(&state.config.session))],
    )
}

/// GET /api/v1/auth/session
///
/// Report the current session.
pub async fn current_session(RequireAdmin(admin): RequireAdmin) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            username: admin.username,
            expires_at: admin.expires_at,
        },
    })
}
