//! Blog author model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub bio: Option<String>,
    /// Object store key of the avatar image, if one was uploaded.
    pub avatar_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new author.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub bio: Option<String>,
}

/// DTO for updating an existing author. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub bio: Option<Option<String>>,
}
