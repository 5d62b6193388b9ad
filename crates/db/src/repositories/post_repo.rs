//! Repository for the `posts` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::patch_parts;
use crate::models::post::{CreatePost, Post, UpdatePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, title, slug, excerpt, body, cover_key, \
                       published_at, created_at, updated_at";

/// Provides CRUD and publishing operations for blog posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post under an already-resolved `slug`.
    ///
    /// A duplicate slug fails on `uq_posts_slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePost,
        slug: &str,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, title, slug, excerpt, body, published_at)
             VALUES ($1, $2, $3, $4, $5, CASE WHEN $6 THEN NOW() ELSE NULL END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.body)
            .bind(input.publish)
            .fetch_one(pool)
            .await
    }

    /// Find a post by internal ID (drafts included).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published post by slug. Drafts are never returned.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts WHERE slug = $1 AND published_at IS NOT NULL"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Whether any post other than `exclude_id` already uses `slug`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM posts WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Admin listing: drafts and published posts, newest first, optionally
    /// filtered by author.
    pub async fn list(
        pool: &PgPool,
        author_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE ($1::BIGINT IS NULL OR author_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Public listing: published posts only, most recently published first.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE published_at IS NOT NULL
             ORDER BY published_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the posts written by an author.
    pub async fn count_by_author(pool: &PgPool, author_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// `slug` must already be validated; it overrides `input.slug`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
        slug: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let (excerpt_provided, excerpt) = patch_parts(&input.excerpt);
        let query = format!(
            "UPDATE posts SET
                author_id = COALESCE($2, author_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                excerpt = CASE WHEN $5 THEN $6 ELSE excerpt END,
                body = COALESCE($7, body)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(slug)
            .bind(excerpt_provided)
            .bind(excerpt)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Mark a post as published. Re-publishing keeps the original timestamp.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET published_at = COALESCE(published_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return a post to draft state.
    pub async fn unpublish(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET published_at = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Point the post's cover image at a new object key (or clear it).
    pub async fn set_cover(
        pool: &PgPool,
        id: DbId,
        cover_key: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET cover_key = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(cover_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post, returning the deleted row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("DELETE FROM posts WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
