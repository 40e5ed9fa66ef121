//! Two-Tier Adapter
//!
//! Serves [`CacheApi`] from a [`FastCache`] backed by a [`DurableCache`].
//!
//! Writes go to the durable layer first and the fast layer second. A failing
//! layer is logged and counted, and the operation continues on the other one;
//! only when both fail does the caller see [`CacheError::Unavailable`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::backend::{DurableCache, FastCache};
use crate::cache::{
    codec, key_name, Expiry, StatsSnapshot, TierStats, MAX_PURGE_ITEMS, MAX_VALUE_SIZE,
};
use crate::config::Config;
use crate::error::{BackendError, CacheError, Result};
use crate::models::{DeleteOutcome, WriteOutcome};
use crate::tiered::CacheApi;

// == Tiered Cache ==
/// Two-tier cache over injected fast and durable backends.
pub struct TieredCache<F: ?Sized, D: ?Sized> {
    fast: Arc<F>,
    durable: Arc<D>,
    namespace: String,
    rehydrate_ttl: u64,
    stats: TierStats,
}

impl<F, D> TieredCache<F, D>
where
    F: FastCache + ?Sized + 'static,
    D: DurableCache + ?Sized + 'static,
{
    // == Constructor ==
    /// Creates an adapter with default configuration.
    pub fn new(fast: Arc<F>, durable: Arc<D>) -> Self {
        Self::with_config(fast, durable, &Config::default())
    }

    /// Creates an adapter using the namespace and rehydration TTL from `config`.
    pub fn with_config(fast: Arc<F>, durable: Arc<D>, config: &Config) -> Self {
        Self {
            fast,
            durable,
            namespace: config.namespace.clone(),
            rehydrate_ttl: config.rehydrate_ttl,
            stats: TierStats::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn fast(&self) -> &Arc<F> {
        &self.fast
    }

    pub fn durable(&self) -> &Arc<D> {
        &self.durable
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Physical key name used in both layers.
    pub fn key_name(&self, key: &str) -> String {
        key_name(&self.namespace, key)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Purge Durable ==
    /// Erases up to `max_items` entries from the durable layer.
    ///
    /// Unlike [`CacheApi::flush_all`] this destroys persisted values. Returns
    /// true when the durable layer is empty afterwards.
    pub async fn purge_durable(&self, max_items: usize) -> Result<bool> {
        if max_items == 0 || max_items > MAX_PURGE_ITEMS {
            return Err(CacheError::InvalidRequest(format!(
                "max_items must be between 1 and {}",
                MAX_PURGE_ITEMS
            )));
        }

        match self.durable.purge(max_items).await {
            Ok(remaining) => {
                debug!("Durable purge left {} entries", remaining);
                Ok(remaining == 0)
            }
            Err(err) => {
                self.stats.record_durable_failure();
                warn!("Durable purge failed: {}", err);
                Err(CacheError::Unavailable(err.to_string()))
            }
        }
    }

    // == Typed Values ==
    /// Encodes `value` as JSON and stores it with [`CacheApi::set`].
    pub async fn set_json<T>(&self, key: &str, value: &T, time: u64) -> Result<WriteOutcome>
    where
        T: Serialize + ?Sized + Sync,
    {
        let bytes = codec::encode(value)?;
        self.set(key, bytes, time).await
    }

    /// Reads a value with [`CacheApi::get`] and decodes it from JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => Ok(Some(codec::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    // == Helpers ==
    fn fast_failed(&self, op: &str, name: &str, err: &BackendError) {
        self.stats.record_fast_failure();
        warn!("Fast layer {} failed for '{}': {}", op, name, err);
    }

    fn durable_failed(&self, op: &str, name: &str, err: &BackendError) {
        self.stats.record_durable_failure();
        warn!("Durable layer {} failed for '{}': {}", op, name, err);
    }

    fn both_down(op: &str, name: &str) -> CacheError {
        CacheError::Unavailable(format!("{} failed for '{}' on both layers", op, name))
    }

    fn check_value(value: &[u8]) -> Result<()> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }
        Ok(())
    }

    /// Durable put then fast set. Stored if either layer accepted the value.
    async fn store_both(
        &self,
        op: &str,
        name: &str,
        value: Vec<u8>,
        expiry: Expiry,
    ) -> Result<WriteOutcome> {
        let durable_ok = match self.durable.put(name, value.clone()).await {
            Ok(()) => true,
            Err(err) => {
                self.durable_failed(op, name, &err);
                false
            }
        };

        let fast_ok = match self.fast.set(name, value, expiry).await {
            Ok(()) => true,
            Err(err) => {
                self.fast_failed(op, name, &err);
                false
            }
        };

        if durable_ok || fast_ok {
            Ok(WriteOutcome::Stored)
        } else {
            Err(Self::both_down(op, name))
        }
    }

    /// Conditional durable put. `None` means the durable layer could not decide.
    async fn durable_put_if_absent(&self, name: &str, value: Vec<u8>) -> Option<bool> {
        match self.durable.put_if_absent(name, value).await {
            Ok(stored) => Some(stored),
            Err(err @ BackendError::Rejected(_)) => {
                self.durable_failed("add", name, &err);
                // Read-only stores still answer reads; an existing key must block add.
                match self.durable.get(name).await {
                    Ok(Some(_)) => Some(false),
                    Ok(None) => None,
                    Err(err) => {
                        self.durable_failed("add", name, &err);
                        None
                    }
                }
            }
            Err(err) => {
                self.durable_failed("add", name, &err);
                None
            }
        }
    }
}

#[async_trait]
impl<F, D> CacheApi for TieredCache<F, D>
where
    F: FastCache + ?Sized + 'static,
    D: DurableCache + ?Sized + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let name = self.key_name(key);

        let fast_down = match self.fast.get(&name).await {
            Ok(Some(value)) => {
                self.stats.record_fast_hit();
                debug!("Fast hit for '{}'", name);
                return Ok(Some(value));
            }
            Ok(None) => false,
            Err(err) => {
                self.fast_failed("get", &name, &err);
                true
            }
        };

        match self.durable.get(&name).await {
            Ok(Some(value)) => {
                self.stats.record_durable_hit();
                debug!("Durable hit for '{}'", name);
                if !fast_down {
                    // add, not set: a write that landed during the durable read is newer
                    let expiry = Expiry::after_secs(self.rehydrate_ttl);
                    match self.fast.add(&name, value.clone(), expiry).await {
                        Ok(true) => self.stats.record_rehydration(),
                        Ok(false) => debug!("Skipped rehydrating '{}': fast layer already refilled", name),
                        Err(err) => self.fast_failed("rehydrate", &name, &err),
                    }
                }
                Ok(Some(value))
            }
            Ok(None) => {
                self.stats.record_miss();
                Ok(None)
            }
            Err(err) => {
                self.durable_failed("get", &name, &err);
                if fast_down {
                    return Err(Self::both_down("get", &name));
                }
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome> {
        Self::check_value(&value)?;
        let name = self.key_name(key);
        let expiry = Expiry::from_memcache_time(time);

        self.store_both("set", &name, value, expiry).await
    }

    async fn add(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome> {
        Self::check_value(&value)?;
        let name = self.key_name(key);
        let expiry = Expiry::from_memcache_time(time);

        let fast_down = match self.fast.get(&name).await {
            Ok(Some(_)) => return Ok(WriteOutcome::AlreadyExists),
            Ok(None) => false,
            Err(err) => {
                self.fast_failed("add", &name, &err);
                true
            }
        };

        let durable_stored = match self.durable_put_if_absent(&name, value.clone()).await {
            Some(false) => return Ok(WriteOutcome::AlreadyExists),
            Some(true) => true,
            None => false,
        };

        if fast_down {
            return if durable_stored {
                Ok(WriteOutcome::Stored)
            } else {
                Err(Self::both_down("add", &name))
            };
        }

        match self.fast.add(&name, value, expiry).await {
            Ok(true) => Ok(WriteOutcome::Stored),
            // A concurrent set landed after our conditional put and already wrote
            // both layers; its fast-layer value is the newer one.
            Ok(false) if durable_stored => Ok(WriteOutcome::Stored),
            Ok(false) => Ok(WriteOutcome::AlreadyExists),
            Err(err) => {
                self.fast_failed("add", &name, &err);
                if durable_stored {
                    Ok(WriteOutcome::Stored)
                } else {
                    Err(Self::both_down("add", &name))
                }
            }
        }
    }

    async fn replace(&self, key: &str, value: Vec<u8>, time: u64) -> Result<WriteOutcome> {
        Self::check_value(&value)?;
        let name = self.key_name(key);
        let expiry = Expiry::from_memcache_time(time);

        match self.durable.get(&name).await {
            Ok(Some(_)) => self.store_both("replace", &name, value, expiry).await,
            Ok(None) => Ok(WriteOutcome::NotFound),
            Err(err) => {
                self.durable_failed("replace", &name, &err);
                // Without the durable layer only the fast layer's atomic replace can decide.
                match self.fast.replace(&name, value, expiry).await {
                    Ok(true) => Ok(WriteOutcome::Stored),
                    Ok(false) => Ok(WriteOutcome::NotFound),
                    Err(err) => {
                        self.fast_failed("replace", &name, &err);
                        Err(Self::both_down("replace", &name))
                    }
                }
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<DeleteOutcome> {
        let name = self.key_name(key);

        let durable_removed = match self.durable.delete(&name).await {
            Ok(removed) => Some(removed),
            Err(err) => {
                self.durable_failed("delete", &name, &err);
                None
            }
        };

        let fast_removed = match self.fast.delete(&name).await {
            Ok(removed) => Some(removed),
            Err(err) => {
                self.fast_failed("delete", &name, &err);
                None
            }
        };

        match (durable_removed, fast_removed) {
            (None, None) => Err(Self::both_down("delete", &name)),
            (durable, fast) => {
                if durable.unwrap_or(false) || fast.unwrap_or(false) {
                    Ok(DeleteOutcome::Deleted)
                } else {
                    Ok(DeleteOutcome::Missing)
                }
            }
        }
    }

    async fn flush_all(&self) -> bool {
        // The durable layer is deliberately left intact; see `purge_durable`.
        match self.fast.flush_all().await {
            Ok(()) => {
                debug!("Fast layer flushed");
                true
            }
            Err(err) => {
                self.fast_failed("flush_all", "*", &err);
                false
            }
        }
    }
}
