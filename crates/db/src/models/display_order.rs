//! Persisted custom display order record.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `display_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DisplayOrder {
    pub id: DbId,
    pub namespace: String,
    pub item_ids: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
