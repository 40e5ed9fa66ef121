//! Backend Module
//!
//! Client-side seams for the two stores the tiered cache layers together,
//! plus in-memory implementations of both.
//!
//! # Backends
//! - [`FastCache`]: volatile store with TTLs and atomic add/replace (memcache)
//! - [`DurableCache`]: persistent store with a conditional put and no TTL

mod memory_durable;
mod memory_fast;

use async_trait::async_trait;

use crate::cache::Expiry;
use crate::error::{BackendError, BackendResult};

pub use memory_durable::MemoryDurableCache;
pub use memory_fast::MemoryFastCache;

// == Fast Cache ==
/// Volatile key-value store queried first on every read and written on every write.
///
/// `add` and `replace` must be atomic per key.
#[async_trait]
pub trait FastCache: Send + Sync {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<()>;

    /// Stores only if the key is absent. Returns whether it stored.
    async fn add(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<bool>;

    /// Stores only if the key is present. Returns whether it stored.
    async fn replace(&self, key: &str, value: Vec<u8>, expiry: Expiry) -> BackendResult<bool>;

    /// Returns whether the key was present.
    async fn delete(&self, key: &str) -> BackendResult<bool>;

    async fn flush_all(&self) -> BackendResult<()>;
}

// == Durable Cache ==
/// Persistent key-value store consulted on fast-layer misses.
///
/// Entries have no TTL; they live until deleted or purged.
#[async_trait]
pub trait DurableCache: Send + Sync {
    async fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>>;

    async fn put(&self, key: &str, value: Vec<u8>) -> BackendResult<()>;

    /// Conditional put: stores only if the key is absent. Returns whether it stored.
    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> BackendResult<bool>;

    /// Returns whether the key was present.
    async fn delete(&self, key: &str) -> BackendResult<bool>;

    /// Removes up to `max_items` entries and returns how many remain.
    async fn purge(&self, max_items: usize) -> BackendResult<usize>;
}

// == Backend Mode ==
/// Operating mode of an in-memory backend, used to simulate maintenance windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Serves reads and writes
    #[default]
    Online,
    /// Serves reads, rejects writes
    ReadOnly,
    /// Fails every call
    Offline,
}

impl BackendMode {
    pub(crate) fn check_read(self, backend: &str) -> BackendResult<()> {
        match self {
            BackendMode::Offline => Err(BackendError::Unavailable(format!("{} is offline", backend))),
            BackendMode::Online | BackendMode::ReadOnly => Ok(()),
        }
    }

    pub(crate) fn check_write(self, backend: &str) -> BackendResult<()> {
        match self {
            BackendMode::Offline => Err(BackendError::Unavailable(format!("{} is offline", backend))),
            BackendMode::ReadOnly => Err(BackendError::Rejected(format!("{} is read-only", backend))),
            BackendMode::Online => Ok(()),
        }
    }
}
