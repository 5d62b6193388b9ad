//! Custom display order overlay for list-type content.
//!
//! Every orderable kind has a canonical list (all entities, newest first)
//! owned by the database, and an optional order record (a list of entity ids)
//! owned by a separate key-value store. [`merge`] combines the two into one
//! deterministic sequence. The two stores are updated independently, so the
//! record may reference deleted entities or miss new ones; both are ordinary
//! data, not faults.
//!
//! The order store is always passed in explicitly as an [`OrderStore`] so
//! callers can substitute [`InMemoryOrderStore`] in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// An entity that can be placed by a custom order record.
pub trait OrderKey {
    /// The identifier stored in order records for this entity.
    fn order_key(&self) -> String;
}

/// Apply `custom_order` on top of `canonical`.
///
/// - An absent or empty custom order returns `canonical` unchanged.
/// - Ids in `custom_order` that resolve are emitted first, in record order.
///   Unresolvable (stale) ids are skipped, and an id listed twice is only
///   emitted once.
/// - Every remaining entity follows in its canonical order.
///
/// The output is always a permutation of `canonical`. `canonical` must not
/// contain duplicate keys.
pub fn merge<T: OrderKey>(canonical: Vec<T>, custom_order: Option<&[String]>) -> Vec<T> {
    let custom_order = match custom_order {
        Some(ids) if !ids.is_empty() => ids,
        _ => return canonical,
    };

    let index: HashMap<String, usize> = canonical
        .iter()
        .enumerate()
        .map(|(i, entity)| (entity.order_key(), i))
        .collect();

    let mut slots: Vec<Option<T>> = canonical.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(slots.len());

    for id in custom_order {
        if let Some(&i) = index.get(id.as_str()) {
            if let Some(entity) = slots[i].take() {
                merged.push(entity);
            }
        }
    }

    merged.extend(slots.into_iter().flatten());
    merged
}

// ---------------------------------------------------------------------------
// Record editing helpers
// ---------------------------------------------------------------------------

/// Remove the first occurrence of `id`. Returns `true` if something was removed.
pub fn remove_first(ids: &mut Vec<String>, id: &str) -> bool {
    match ids.iter().position(|existing| existing == id) {
        Some(pos) => {
            ids.remove(pos);
            true
        }
        None => false,
    }
}

/// Append `id` unless it is already present. Returns `true` if it was appended.
pub fn append_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

/// Key-value store holding one order record per namespace.
///
/// Implementations report unreachable backends as
/// [`CoreError::StoreUnavailable`]. No retries happen at this layer.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// The record for `namespace`, or an empty list if none was ever saved.
    async fn get_order(&self, namespace: &str) -> Result<Vec<String>, CoreError>;

    /// Remove the first occurrence of `id`; no-op if absent.
    async fn remove_from_order(&self, namespace: &str, id: &str) -> Result<(), CoreError>;

    /// Append `id` to the end of the record unless already present.
    async fn append_to_order(&self, namespace: &str, id: &str) -> Result<(), CoreError>;

    /// Overwrite the whole record. Last write wins.
    async fn replace_order(&self, namespace: &str, ids: &[String]) -> Result<(), CoreError>;
}

/// Prune a deleted entity's id from the order record for `namespace`.
pub async fn remove_id(store: &dyn OrderStore, namespace: &str, id: &str) -> Result<(), CoreError> {
    store.remove_from_order(namespace, id).await
}

/// Add an entity to the end of the order record for `namespace`. Idempotent.
pub async fn append_id(store: &dyn OrderStore, namespace: &str, id: &str) -> Result<(), CoreError> {
    store.append_to_order(namespace, id).await
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local [`OrderStore`]. Records are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    records: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records.
    pub fn with_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        Self {
            records: RwLock::new(records.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get_order(&self, namespace: &str) -> Result<Vec<String>, CoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }

    async fn remove_from_order(&self, namespace: &str, id: &str) -> Result<(), CoreError> {
        if let Some(ids) = self.records.write().await.get_mut(namespace) {
            remove_first(ids, id);
        }
        Ok(())
    }

    async fn append_to_order(&self, namespace: &str, id: &str) -> Result<(), CoreError> {
        let mut records = self.records.write().await;
        append_unique(records.entry(namespace.to_string()).or_default(), id);
        Ok(())
    }

    async fn replace_order(&self, namespace: &str, ids: &[String]) -> Result<(), CoreError> {
        self.records
            .write()
            .await
            .insert(namespace.to_string(), ids.to_vec());
        Ok(())
    }
}
