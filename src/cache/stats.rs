//! Cache Statistics Module
//!
//! Tracks per-tier hits, misses, rehydrations and backend failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Tier Stats ==
/// Lock-free counters updated by the tiered adapter.
#[derive(Debug, Default)]
pub struct TierStats {
    fast_hits: AtomicU64,
    durable_hits: AtomicU64,
    misses: AtomicU64,
    rehydrations: AtomicU64,
    fast_failures: AtomicU64,
    durable_failures: AtomicU64,
}

impl TierStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fast_hit(&self) {
        self.fast_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_durable_hit(&self) {
        self.durable_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rehydration(&self) {
        self.rehydrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fast_failure(&self) {
        self.fast_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_durable_failure(&self) {
        self.durable_failures.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            fast_hits: self.fast_hits.load(Ordering::Relaxed),
            durable_hits: self.durable_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            rehydrations: self.rehydrations.load(Ordering::Relaxed),
            fast_failures: self.fast_failures.load(Ordering::Relaxed),
            durable_failures: self.durable_failures.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of [`TierStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Reads served by the fast layer
    pub fast_hits: u64,
    /// Reads served by the durable layer after a fast miss
    pub durable_hits: u64,
    /// Reads that found nothing in either layer
    pub misses: u64,
    /// Durable hits successfully written back to the fast layer
    pub rehydrations: u64,
    /// Fast-layer calls that failed
    pub fast_failures: u64,
    /// Durable-layer calls that failed
    pub durable_failures: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns (fast_hits + durable_hits) / reads, or 0.0 if nothing was read.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.fast_hits + self.durable_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
