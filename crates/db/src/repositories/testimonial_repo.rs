//! Repository for the `testimonials` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::patch_parts;
use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

const COLUMNS: &str = "id, quote, author_name, author_title, company, created_at, updated_at";

/// Provides CRUD operations for testimonial quotes.
pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (quote, author_name, author_title, company)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.quote)
            .bind(&input.author_name)
            .bind(&input.author_title)
            .bind(&input.company)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Canonical listing: most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM testimonials ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Testimonial>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let (title_provided, author_title) = patch_parts(&input.author_title);
        let (company_provided, company) = patch_parts(&input.company);
        let query = format!(
            "UPDATE testimonials SET
                quote = COALESCE($2, quote),
                author_name = COALESCE($3, author_name),
                author_title = CASE WHEN $4 THEN $5 ELSE author_title END,
                company = CASE WHEN $6 THEN $7 ELSE company END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.quote)
            .bind(&input.author_name)
            .bind(title_provided)
            .bind(author_title)
            .bind(company_provided)
            .bind(company)
            .fetch_optional(pool)
            .await
    }

    /// Delete a testimonial. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
