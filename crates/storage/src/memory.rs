use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{join_url, validate_key, MediaStore, StorageError, StorageResult};

const DEFAULT_BASE_URL: &str = "memory://media";

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory media store for tests and local development.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    base_url: String,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MemoryStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            base_url: base_url.into(),
        }
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryStore::default();
        store
            .put("avatars/team/a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap();

        let obj = store.get("avatars/team/a.png").await.unwrap();
        assert_eq!(obj.data, b"png");
        assert_eq!(obj.content_type, "image/png");
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = MemoryStore::default();
        store.put("k/1", b"one".to_vec(), "text/plain").await.unwrap();
        store.put("k/1", b"two".to_vec(), "text/plain").await.unwrap();
        assert_eq!(store.get("k/1").await.unwrap().data, b"two");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::default();
        store.put("k/1", b"x".to_vec(), "text/plain").await.unwrap();
        store.delete("k/1").await.unwrap();
        store.delete("k/1").await.unwrap();
        assert!(store.is_empty().await);
        assert_matches!(store.get("k/1").await, Err(StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn rejects_invalid_keys() {
        let store = MemoryStore::default();
        assert_matches!(
            store.put("../escape", vec![1], "text/plain").await,
            Err(StorageError::InvalidInput(_))
        );
    }

    #[tokio::test]
    async fn clones_share_objects() {
        let store = MemoryStore::default();
        let clone = store.clone();
        store.put("k/1", b"x".to_vec(), "text/plain").await.unwrap();
        assert!(clone.contains("k/1").await);
    }

    #[test]
    fn public_url_uses_base() {
        let store = MemoryStore::new("http://localhost:3000/media/");
        assert_eq!(
            store.public_url("gallery/images/a.png"),
            "http://localhost:3000/media/gallery/images/a.png"
        );
    }
}
