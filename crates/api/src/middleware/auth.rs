//! Session extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrine_core::error::CoreError;

use crate::auth::session::{token_from_headers, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    /// Session expiry (UTC Unix timestamp).
    pub expires_at: i64,
}

/// Requires a valid session cookie or Bearer token. Rejects with 401 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     tracing::info!(username = %admin.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not signed in".into()))
        })?;

        let claims = validate_token(token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        // Tokens for a previous administrator account stop working when the
        // configured username changes.
        if claims.sub != state.config.session.admin_username {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session".into(),
            )));
        }

        Ok(RequireAdmin(AdminSession {
            username: claims.sub,
            expires_at: claims.exp,
        }))
    }
}
