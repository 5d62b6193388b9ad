//! Team member model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::ordering::OrderKey;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `team_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub role_title: String,
    pub bio: Option<String>,
    pub avatar_key: Option<String>,
    pub profile_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderKey for TeamMember {
    fn order_key(&self) -> String {
        self.id.to_string()
    }
}

/// DTO for creating a new team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub role_title: String,
    pub bio: Option<String>,
    pub profile_url: Option<String>,
}

/// DTO for updating an existing team member. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub role_title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub profile_url: Option<Option<String>>,
}
