//! Session tokens for the single site administrator.
//!
//! A session is an HS256-signed JWT carried in an `HttpOnly` cookie. The same
//! token is accepted as an `Authorization: Bearer` header for scripted access.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::verify_password;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "vitrine_session";

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 12;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the administrator's username.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Session signing and administrator credentials.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 12).
    pub ttl_hours: i64,
    /// Add `Secure` to the cookie (default: true).
    pub cookie_secure: bool,
    pub admin_username: String,
    /// Argon2id PHC string.
    pub admin_password_hash: String,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl_hours", &self.ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SESSION_SECRET`        | **yes**  | --      |
    /// | `SESSION_TTL_HOURS`     | no       | `12`    |
    /// | `SESSION_COOKIE_SECURE` | no       | `true`  |
    /// | `ADMIN_USERNAME`        | **yes**  | --      |
    /// | `ADMIN_PASSWORD_HASH`   | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        let cookie_secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be 'true' or 'false'");

        let admin_username =
            std::env::var("ADMIN_USERNAME").expect("ADMIN_USERNAME must be set in the environment");
        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set in the environment");
        assert!(
            !admin_username.is_empty() && !admin_password_hash.is_empty(),
            "ADMIN_USERNAME and ADMIN_PASSWORD_HASH must not be empty"
        );

        Self {
            secret,
            ttl_hours,
            cookie_secure,
            admin_username,
            admin_password_hash,
        }
    }

    /// Session lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_hours * 3600
    }
}

/// Outcome of checking a login attempt against the configured administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginCheck {
    Valid,
    UnknownUser,
    WrongPassword,
}

/// Check a login attempt.
///
/// The Argon2 verify runs for every attempt, so an unknown username takes
/// as long to reject as a wrong password.
pub fn check_credentials(
    config: &SessionConfig,
    username: &str,
    password: &str,
) -> Result<LoginCheck, argon2::password_hash::Error> {
    let password_valid = verify_password(password, &config.admin_password_hash)?;
    Ok(if username != config.admin_username {
        LoginCheck::UnknownUser
    } else if !password_valid {
        LoginCheck::WrongPassword
    } else {
        LoginCheck::Valid
    })
}

/// Issue a session token for `username`.
pub fn generate_session_token(
    username: &str,
    config: &SessionConfig,
) -> Result<(String, Claims), jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: username.to_string(),
        exp: now + config.ttl_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok((token, claims))
}

/// Validate and decode a session token.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{secure}",
        config.ttl_secs()
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{secure}")
}

/// Pull the session token from the cookie, falling back to a Bearer header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value);

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}
