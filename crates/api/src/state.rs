use std::sync::Arc;

use vitrine_core::ordering::{InMemoryOrderStore, OrderStore};
use vitrine_db::PgOrderStore;
use vitrine_storage::{MediaStore, MemoryStore, S3Store};

use crate::cache::ContentCache;
use crate::config::{OrderStoreBackend, OrderingConfig, ServerConfig, StorageConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (canonical content store).
    pub pool: vitrine_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Custom display order records. `None` disables the overlay everywhere.
    pub order_store: Option<Arc<dyn OrderStore>>,
    /// Uploaded media objects.
    pub media_store: Arc<dyn MediaStore>,
    /// Public site response cache.
    pub cache: Arc<ContentCache>,
}

impl AppState {
    pub fn new(
        pool: vitrine_db::DbPool,
        config: ServerConfig,
        order_store: Option<Arc<dyn OrderStore>>,
        media_store: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            order_store,
            media_store,
            cache: Arc::new(ContentCache::new()),
        }
    }
}

/// Build the configured order store.
pub fn build_order_store(
    config: &OrderingConfig,
    pool: &vitrine_db::DbPool,
) -> Option<Arc<dyn OrderStore>> {
    match config.backend {
        OrderStoreBackend::Postgres => Some(Arc::new(PgOrderStore::new(pool.clone()))),
        OrderStoreBackend::Memory => {
            tracing::warn!("Using in-memory order store; custom orders are lost on restart");
            Some(Arc::new(InMemoryOrderStore::new()))
        }
        OrderStoreBackend::Disabled => {
            tracing::info!("Order store disabled; listings use canonical order");
            None
        }
    }
}

/// Build the configured media store.
pub async fn build_media_store(config: &StorageConfig) -> Arc<dyn MediaStore> {
    match config {
        StorageConfig::S3(s3) => Arc::new(S3Store::connect(s3).await),
        StorageConfig::Memory { public_base_url } => {
            tracing::warn!("Using in-memory media store; uploads are lost on restart");
            Arc::new(MemoryStore::new(public_base_url.clone()))
        }
    }
}
