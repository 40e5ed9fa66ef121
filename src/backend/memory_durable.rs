//! In-Memory Durable Cache
//!
//! Persistent-semantics table store: no TTL, conditional put, bounded purge.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::{BackendMode, DurableCache};
use crate::error::BackendResult;

const BACKEND_NAME: &str = "durable cache";

// == Memory Durable Cache ==
/// Durable layer keeping every value until it is deleted or purged.
#[derive(Debug, Default)]
pub struct MemoryDurableCache {
    inner: RwLock<DurableInner>,
}

#[derive(Debug, Default)]
struct DurableInner {
    items: HashMap<String, Vec<u8>>,
    mode: BackendMode,
}

impl MemoryDurableCache {
    pub fn new() -> Self {
        Self::default()
    }

    // == Mode ==
    /// Switches the simulated availability of the store.
    pub async fn set_mode(&self, mode: BackendMode) {
        self.inner.write().await.mode = mode;
    }

    pub async fn mode(&self) -> BackendMode {
        self.inner.read().await.mode
    }

    // == Peek ==
    /// Reads a value directly, ignoring the mode.
    pub async fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.read().await.items.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DurableCache for MemoryDurableCache {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        let inner = self.inner.read().await;
        inner.mode.check_read(BACKEND_NAME)?;
        Ok(inner.items.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> BackendResult<()> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;
        inner.items.insert(key.to_string(), value);
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> BackendResult<bool> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        if inner.items.contains_key(key) {
            return Ok(false);
        }
        inner.items.insert(key.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> BackendResult<bool> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;
        Ok(inner.items.remove(key).is_some())
    }

    async fn purge(&self, max_items: usize) -> BackendResult<usize> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        let batch: Vec<String> = inner.items.keys().take(max_items).cloned().collect();
        for key in &batch {
            inner.items.remove(key);
        }
        Ok(inner.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryDurableCache::new();
        store.put("key", b"value".to_vec()).await.unwrap();

        assert_eq!(store.get("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_if_absent() {
        let store = MemoryDurableCache::new();

        assert!(store.put_if_absent("key", b"v1".to_vec()).await.unwrap());
        assert!(!store.put_if_absent("key", b"v2".to_vec()).await.unwrap());
        assert_eq!(store.peek("key").await, Some(b"v1".to_vec()));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryDurableCache::new();
        store.put("key", b"v".to_vec()).await.unwrap();

        assert!(store.delete("key").await.unwrap());
        assert!(!store.delete("key").await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_is_bounded() {
        let store = MemoryDurableCache::new();
        for i in 0..5 {
            store.put(&format!("key{}", i), b"v".to_vec()).await.unwrap();
        }

        assert_eq!(store.purge(2).await.unwrap(), 3);
        assert_eq!(store.purge(1000).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_read_only_mode() {
        let store = MemoryDurableCache::new();
        store.put("key", b"v".to_vec()).await.unwrap();
        store.set_mode(BackendMode::ReadOnly).await;

        assert_eq!(store.get("key").await.unwrap(), Some(b"v".to_vec()));
        assert!(matches!(
            store.put("key", b"w".to_vec()).await,
            Err(BackendError::Rejected(_))
        ));
        assert!(matches!(
            store.delete("key").await,
            Err(BackendError::Rejected(_))
        ));
        assert_eq!(store.peek("key").await, Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_offline_mode() {
        let store = MemoryDurableCache::new();
        store.set_mode(BackendMode::Offline).await;

        assert!(matches!(
            store.get("key").await,
            Err(BackendError::Unavailable(_))
        ));
        assert_eq!(store.mode().await, BackendMode::Offline);
    }
}
