//! Repository for the `display_orders` table.
//!
//! One row per namespace; `item_ids` is the custom display order record.
//! Ids are never validated against the content tables.

use sqlx::PgPool;
use vitrine_core::ordering;

use crate::models::display_order::DisplayOrder;

const COLUMNS: &str = "id, namespace, item_ids, created_at, updated_at";

/// Provides read and edit operations on display order records.
pub struct DisplayOrderRepo;

impl DisplayOrderRepo {
    /// Find the record for a namespace.
    pub async fn find(pool: &PgPool, namespace: &str) -> Result<Option<DisplayOrder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM display_orders WHERE namespace = $1");
        sqlx::query_as::<_, DisplayOrder>(&query)
            .bind(namespace)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite the record for a namespace.
    pub async fn upsert(
        pool: &PgPool,
        namespace: &str,
        item_ids: &[String],
    ) -> Result<DisplayOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO display_orders (namespace, item_ids)
             VALUES ($1, $2)
             ON CONFLICT (namespace) DO UPDATE SET item_ids = EXCLUDED.item_ids
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DisplayOrder>(&query)
            .bind(namespace)
            .bind(item_ids)
            .fetch_one(pool)
            .await
    }

    /// Append `item_id` unless already present, creating the record if needed.
    pub async fn append(pool: &PgPool, namespace: &str, item_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO display_orders (namespace, item_ids)
             VALUES ($1, ARRAY[$2::TEXT])
             ON CONFLICT (namespace) DO UPDATE SET item_ids =
                CASE WHEN $2::TEXT = ANY(display_orders.item_ids)
                     THEN display_orders.item_ids
                     ELSE array_append(display_orders.item_ids, $2::TEXT)
                END",
        )
        .bind(namespace)
        .bind(item_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove the first occurrence of `item_id`.
    ///
    /// The row is locked for the read-modify-write so concurrent removals do
    /// not resurrect each other's ids. Returns `true` if an id was removed.
    pub async fn remove_first(
        pool: &PgPool,
        namespace: &str,
        item_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<Vec<String>> = sqlx::query_scalar(
            "SELECT item_ids FROM display_orders WHERE namespace = $1 FOR UPDATE",
        )
        .bind(namespace)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut item_ids) = current else {
            tx.commit().await?;
            return Ok(false);
        };

        let removed = ordering::remove_first(&mut item_ids, item_id);
        if removed {
            sqlx::query("UPDATE display_orders SET item_ids = $2 WHERE namespace = $1")
                .bind(namespace)
                .bind(&item_ids)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }
}
