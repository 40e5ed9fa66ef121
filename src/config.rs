//! Configuration Module
//!
//! Handles loading the tiered cache configuration from environment variables.

use std::env;

/// Tiered cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefixed to every key name in both layers
    pub namespace: String,
    /// Maximum number of entries the in-memory fast layer can hold
    pub max_entries: usize,
    /// Memcache-style time applied when a durable hit is written back to the fast layer
    pub rehydrate_ttl: u64,
    /// Background sweep task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAMESPACE` - Key namespace (default: empty)
    /// - `MAX_ENTRIES` - Fast layer capacity (default: 1000)
    /// - `REHYDRATE_TTL` - Expiry for rehydrated entries in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            namespace: env::var("CACHE_NAMESPACE").unwrap_or(defaults.namespace),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            rehydrate_ttl: parse_var("REHYDRATE_TTL").unwrap_or(defaults.rehydrate_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            max_entries: 1000,
            rehydrate_ttl: 300,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.namespace, "");
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.rehydrate_ttl, 300);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_NAMESPACE");
        env::remove_var("MAX_ENTRIES");
        env::remove_var("REHYDRATE_TTL");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.namespace, "");
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.rehydrate_ttl, 300);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TIERED_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(parse_var::<u64>("TIERED_CACHE_TEST_GARBAGE"), None);
        env::remove_var("TIERED_CACHE_TEST_GARBAGE");
    }
}
