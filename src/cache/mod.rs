//! Cache Module
//!
//! Building blocks shared by the backends and the tiered adapter: entries and
//! expiry, key naming, LRU tracking, statistics and the value codec.

pub mod codec;
mod entry;
mod key;
mod lru;
mod stats;


// Re-export public types
pub use entry::{CacheEntry, Expiry};
pub use key::key_name;
pub use lru::LruTracker;
pub use stats::{StatsSnapshot, TierStats};

// == Public Constants ==
/// Longest namespaced key name stored verbatim; longer keys are hashed
pub const MAX_KEY_LENGTH: usize = 250;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Largest memcache `time` treated as relative seconds (31 days)
pub const MAX_RELATIVE_EXPIRY_SECS: u64 = 2_678_400;

/// Upper bound on entries removed by a single durable purge
pub const MAX_PURGE_ITEMS: usize = 1000;
