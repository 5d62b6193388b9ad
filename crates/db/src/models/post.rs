//! Blog post model and DTOs.
//!
//! A post with `published_at = NULL` is a draft and never appears on the
//! public site.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub cover_key: Option<String>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// DTO for creating a new post.
///
/// When `slug` is omitted it is generated from the title.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub author_id: DbId,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: String,
    /// Publish immediately instead of saving a draft.
    #[serde(default)]
    pub publish: bool,
}

/// DTO for updating an existing post. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    pub author_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub excerpt: Option<Option<String>>,
    pub body: Option<String>,
}
