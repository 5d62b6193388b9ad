//! [`OrderStore`] backed by the `display_orders` table.

use async_trait::async_trait;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::OrderStore;

use crate::repositories::DisplayOrderRepo;
use crate::DbPool;

const STORE_NAME: &str = "display_orders";

/// Order records persisted in PostgreSQL.
///
/// Shares the connection pool with the content tables but is not coupled to
/// them transactionally.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: DbPool,
}

impl PgOrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Order store query failed");
    CoreError::StoreUnavailable {
        store: STORE_NAME,
        message: err.to_string(),
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn get_order(&self, namespace: &str) -> Result<Vec<String>, CoreError> {
        let record = DisplayOrderRepo::find(&self.pool, namespace)
            .await
            .map_err(unavailable)?;
        Ok(record.map(|r| r.item_ids).unwrap_or_default())
    }

    async fn remove_from_order(&self, namespace: &str, id: &str) -> Result<(), CoreError> {
        DisplayOrderRepo::remove_first(&self.pool, namespace, id)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn append_to_order(&self, namespace: &str, id: &str) -> Result<(), CoreError> {
        DisplayOrderRepo::append(&self.pool, namespace, id)
            .await
            .map_err(unavailable)
    }

    async fn replace_order(&self, namespace: &str, ids: &[String]) -> Result<(), CoreError> {
        DisplayOrderRepo::upsert(&self.pool, namespace, ids)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
