//! Tiered Cache - A memcache-compatible two-tier cache
//!
//! Layers a volatile fast cache over a durable store so values survive
//! evictions and maintenance windows of the fast layer.
//!
//! ```ignore
//! let fast = Arc::new(MemoryFastCache::new(1000));
//! let durable = Arc::new(MemoryDurableCache::new());
//! let cache = TieredCache::new(fast, durable);
//!
//! cache.set("greeting", b"hello".to_vec(), 0).await?;
//! assert_eq!(cache.get("greeting").await?, Some(b"hello".to_vec()));
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod tiered;

pub use backend::{BackendMode, DurableCache, FastCache, MemoryDurableCache, MemoryFastCache};
pub use cache::{Expiry, StatsSnapshot};
pub use config::Config;
pub use error::{BackendError, CacheError, Result};
pub use models::{DeleteOutcome, WriteOutcome};
pub use tasks::spawn_sweep_task;
pub use tiered::{CacheApi, TieredCache};
