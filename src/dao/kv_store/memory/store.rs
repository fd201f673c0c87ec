use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{kv_store::KeyValueStore, storage::StorageResult};

/// Key-value backend keeping every value in a concurrent in-process map.
///
/// Contents vanish when the last handle is dropped, which is exactly what
/// tests want: every test builds its own store and gets a clean namespace.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryKvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: String) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let entries = Arc::clone(&self.entries);
        Box::pin(async move { Ok(entries.get(&key).map(|entry| entry.value().clone())) })
    }

    fn set(&self, key: String, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let entries = Arc::clone(&self.entries);
        Box::pin(async move {
            entries.insert(key, value);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_reads_back_as_none() {
        let store = MemoryKvStore::new();
        let value = store.get("absent".into()).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryKvStore::new();
        store.set("k".into(), "v1".into()).await.unwrap();
        assert_eq!(store.get("k".into()).await.unwrap().as_deref(), Some("v1"));

        store.set("k".into(), "v2".into()).await.unwrap();
        assert_eq!(store.get("k".into()).await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn clones_share_the_same_entries() {
        let store = MemoryKvStore::new();
        let alias = store.clone();
        store.set("shared".into(), "yes".into()).await.unwrap();
        assert_eq!(
            alias.get("shared".into()).await.unwrap().as_deref(),
            Some("yes")
        );
    }
}
