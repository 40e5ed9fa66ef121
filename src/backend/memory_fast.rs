//! In-Memory Fast Cache
//!
//! Volatile store combining HashMap storage with LRU capacity eviction and
//! TTL expiration, standing in for a managed memcache service.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{BackendMode, FastCache};
use crate::cache::{CacheEntry, Expiry, LruTracker};
use crate::config::Config;
use crate::error::BackendResult;

const BACKEND_NAME: &str = "fast cache";

// == Memory Fast Cache ==
/// Volatile fast layer with LRU eviction and TTL support.
///
/// All operations on one key run under a single lock, so `add` and
/// `replace` are atomic.
#[derive(Debug)]
pub struct MemoryFastCache {
    inner: RwLock<FastInner>,
}

#[derive(Debug)]
struct FastInner {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    max_entries: usize,
    evictions: u64,
    mode: BackendMode,
}

impl FastInner {
    /// Drops `key` if it has expired. Returns whether a live entry remains.
    fn is_live(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.lru.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn insert(&mut self, key: &str, value: Vec<u8>, expiry: Expiry) {
        if !self.entries.contains_key(key) {
            while self.entries.len() >= self.max_entries {
                let Some(victim) = self.lru.pop_lru() else {
                    break;
                };
                self.entries.remove(&victim);
                self.evictions += 1;
                debug!(key = %victim, "fast cache evicted least recently used entry");
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, expiry));
        self.lru.touch(key);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

impl MemoryFastCache {
    // == Constructor ==
    /// Creates an empty fast layer holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(FastInner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                max_entries: max_entries.max(1),
                evictions: 0,
                mode: BackendMode::Online,
            }),
        }
    }

    /// Creates an empty fast layer sized by `config.max_entries`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries)
    }

    // == Mode ==
    /// Switches the simulated availability of the store.
    pub async fn set_mode(&self, mode: BackendMode) {
        self.inner.write().await.mode = mode;
    }

    pub async fn mode(&self) -> BackendMode {
        self.inner.read().await.mode
    }

    // == Evict ==
    /// Drops a single entry the way memcache does under memory pressure:
    /// silently and regardless of mode.
    pub async fn evict(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.remove(key);
        if removed {
            inner.evictions += 1;
        }
        removed
    }

    // == Peek ==
    /// Reads a live value without touching LRU order or honouring the mode.
    pub async fn peek(&self, key: &str) -> Option<Vec<u8>> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Sweep Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove(key);
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of entries dropped by capacity pressure or [`MemoryFastCache::evict`].
    pub async fn evictions(&self) -> u64 {
        self.inner.read().await.evictions
    }
}

#[async_trait]
impl FastCache for MemoryFastCache {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>> {
        let mut inner = self.inner.write().await;
        inner.mode.check_read(BACKEND_NAME)?;

        if !inner.is_live(key) {
            return Ok(None);
        }
        inner.lru.touch(key);
        Ok(inner.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<()> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        inner.insert(key, value, expiry);
        Ok(())
    }

    async fn add(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<bool> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        if inner.is_live(key) {
            return Ok(false);
        }
        inner.insert(key, value, expiry);
        Ok(true)
    }

    async fn replace(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<bool> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        if !inner.is_live(key) {
            return Ok(false);
        }
        inner.insert(key, value, expiry);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> BackendResult<bool> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        let was_live = inner.is_live(key);
        inner.remove(key);
        Ok(was_live)
    }

    async fn flush_all(&self) -> BackendResult<()> {
        let mut inner = self.inner.write().await;
        inner.mode.check_write(BACKEND_NAME)?;

        inner.entries.clear();
        inner.lru.clear();
        Ok(())
    }
}
