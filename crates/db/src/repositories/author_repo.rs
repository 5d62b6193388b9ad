//! Repository for the `authors` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::author::{Author, CreateAuthor, UpdateAuthor};
use crate::models::patch_parts;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, bio, avatar_key, created_at, updated_at";

/// Provides CRUD operations for blog authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (name, bio)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    /// Find an author by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all authors, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Author>(&query).fetch_all(pool).await
    }

    /// Update an author. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAuthor,
    ) -> Result<Option<Author>, sqlx::Error> {
        let (bio_provided, bio) = patch_parts(&input.bio);
        let query = format!(
            "UPDATE authors SET
                name = COALESCE($2, name),
                bio = CASE WHEN $3 THEN $4 ELSE bio END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(bio_provided)
            .bind(bio)
            .fetch_optional(pool)
            .await
    }

    /// Point the author's avatar at a new object key (or clear it).
    pub async fn set_avatar(
        pool: &PgPool,
        id: DbId,
        avatar_key: Option<&str>,
    ) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET avatar_key = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(avatar_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete an author, returning the deleted row.
    ///
    /// Fails with a foreign key violation while posts still reference the author.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("DELETE FROM authors WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
