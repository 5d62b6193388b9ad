//! Form field validation and slug generation shared by the admin handlers.
//!
//! All validators return [`CoreError::Validation`] with a message naming the
//! offending field, which the API layer surfaces as a 400.

use validator::ValidateUrl;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field limits
// ---------------------------------------------------------------------------

pub const NAME_MAX_LEN: usize = 120;
pub const TITLE_MAX_LEN: usize = 200;
pub const SLUG_MAX_LEN: usize = 200;
pub const EXCERPT_MAX_LEN: usize = 500;
pub const BIO_MAX_LEN: usize = 2_000;
pub const QUOTE_MAX_LEN: usize = 1_000;
pub const ALT_TEXT_MAX_LEN: usize = 300;
pub const BODY_MAX_LEN: usize = 100_000;
pub const URL_MAX_LEN: usize = 2_048;

// ---------------------------------------------------------------------------
// Generic field checks
// ---------------------------------------------------------------------------

/// A required text field: non-blank and at most `max_len` characters.
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_len(field, value, max_len)
}

/// An optional text field: if present, at most `max_len` characters.
pub fn validate_optional(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max_len(field, v, max_len),
        None => Ok(()),
    }
}

fn validate_max_len(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// An optional absolute `http`/`https` URL.
pub fn validate_optional_url(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    let Some(url) = value else {
        return Ok(());
    };
    validate_max_len(field, url, URL_MAX_LEN)?;
    let is_http = url.starts_with("http://") || url.starts_with("https://");
    if !is_http || !url.to_string().validate_url() {
        return Err(CoreError::Validation(format!(
            "{field} must be an absolute http(s) URL"
        )));
    }
    Ok(())
}

/// Trim a field and map blank input to `None`.
///
/// HTML forms submit empty strings for untouched optional inputs.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// [`normalize_optional`] for a clearable patch field.
///
/// The outer `Option` says whether the field was sent at all; a blank value
/// that was sent becomes an explicit clear (`Some(None)`).
pub fn normalize_patch(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(normalize_optional)
}

/// The value a clearable patch field would store, if any.
pub fn patch_value(value: &Option<Option<String>>) -> Option<&str> {
    value.as_ref().and_then(|v| v.as_deref())
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a title.
///
/// Converts to lowercase, replaces anything that is not ASCII alphanumeric
/// with hyphens, collapses consecutive hyphens, and trims leading/trailing
/// hyphens.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Validate a slug (non-empty, lowercase alphanumeric and single hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > SLUG_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {SLUG_MAX_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(CoreError::Validation(
            "Slug must not start or end with a hyphen or contain consecutive hyphens".into(),
        ));
    }
    Ok(())
}
