//! Cache Entry Module
//!
//! Defines individual fast-layer entries and memcache-style expiry resolution.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::cache::MAX_RELATIVE_EXPIRY_SECS;

// == Expiry ==
/// Absolute expiry of an entry, resolved from a memcache `time` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Entry never expires
    Never,
    /// Entry expires at the given instant
    At(DateTime<Utc>),
}

impl Expiry {
    // == From Memcache Time ==
    /// Resolves a memcache `time` argument against the current clock.
    ///
    /// - `0` never expires
    /// - up to 31 days is relative seconds from now
    /// - anything larger is an absolute Unix timestamp in seconds
    pub fn from_memcache_time(time: u64) -> Self {
        Self::from_memcache_time_at(time, Utc::now())
    }

    /// Same as [`Expiry::from_memcache_time`] with an explicit `now`.
    pub fn from_memcache_time_at(time: u64, now: DateTime<Utc>) -> Self {
        match time {
            0 => Expiry::Never,
            t if t <= MAX_RELATIVE_EXPIRY_SECS => Expiry::At(now + Duration::seconds(t as i64)),
            t => i64::try_from(t)
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
                .map_or(Expiry::Never, Expiry::At),
        }
    }

    // == After Seconds ==
    /// Expiry `secs` seconds from now, always relative; `0` never expires.
    ///
    /// Unlike memcache times, large values are not read as Unix timestamps.
    pub fn after_secs(secs: u64) -> Self {
        Self::after_secs_at(secs, Utc::now())
    }

    pub fn after_secs_at(secs: u64, now: DateTime<Utc>) -> Self {
        if secs == 0 {
            return Expiry::Never;
        }
        i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .map_or(Expiry::Never, Expiry::At)
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(at) => *at <= now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

// == Cache Entry ==
/// A single fast-layer entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value, opaque to the cache
    pub value: Vec<u8>,
    /// When the entry stops being served
    pub expiry: Expiry,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(value: Vec<u8>, expiry: Expiry) -> Self {
        Self { value, expiry }
    }

    pub fn is_expired(&self) -> bool {
        self.expiry.is_expired()
    }
}
