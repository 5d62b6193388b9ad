//! Repository for the `team_members` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::patch_parts;
use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role_title, bio, avatar_key, profile_url, created_at, updated_at";

/// Provides CRUD operations for team members.
pub struct TeamMemberRepo;

impl TeamMemberRepo {
    /// Insert a new team member, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members (name, role_title, bio, profile_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(&input.name)
            .bind(&input.role_title)
            .bind(&input.bio)
            .bind(&input.profile_url)
            .fetch_one(pool)
            .await
    }

    /// Find a team member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Canonical listing: every member, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM team_members ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, TeamMember>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a team member. Missing fields keep their stored value;
    /// `bio` and `profile_url` can be cleared with `Some(None)`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let (bio_provided, bio) = patch_parts(&input.bio);
        let (url_provided, profile_url) = patch_parts(&input.profile_url);
        let query = format!(
            "UPDATE team_members SET
                name = COALESCE($2, name),
                role_title = COALESCE($3, role_title),
                bio = CASE WHEN $4 THEN $5 ELSE bio END,
                profile_url = CASE WHEN $6 THEN $7 ELSE profile_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role_title)
            .bind(bio_provided)
            .bind(bio)
            .bind(url_provided)
            .bind(profile_url)
            .fetch_optional(pool)
            .await
    }

    /// Point the member's avatar at a new object key (or clear it).
    pub async fn set_avatar(
        pool: &PgPool,
        id: DbId,
        avatar_key: Option<&str>,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET avatar_key = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(avatar_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete a team member, returning the deleted row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("DELETE FROM team_members WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
