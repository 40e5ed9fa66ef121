//! Tiered Cache Module
//!
//! The memcache-compatible surface and the adapter that serves it from a
//! fast layer backed by a durable layer.

mod adapter;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DeleteOutcome, WriteOutcome};

pub use adapter::TieredCache;

// == Cache API ==
/// Memcache-compatible operations.
///
/// `time` follows memcache: `0` never expires, up to 31 days is relative
/// seconds, larger values are absolute Unix timestamps.
#[async_trait]
pub trait CacheApi: Send + Sync {
    /// Returns the value for `key`, or `None` if no layer has it.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` regardless of previous contents.
    async fn set(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome>;

    /// Stores `value` only if `key` is absent.
    async fn add(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome>;

    /// Stores `value` only if `key` is present.
    async fn replace(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome>;

    /// Removes `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<DeleteOutcome>;

    /// Invalidates every cached entry. Returns false if nothing could be flushed.
    async fn flush_all(&self) -> bool;
}
