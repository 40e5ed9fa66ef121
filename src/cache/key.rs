//! Key Name Module
//!
//! Derives the physical key name shared by both layers from a caller key and
//! a namespace.

use sha2::{Digest, Sha256};

use crate::cache::MAX_KEY_LENGTH;

// == Key Name ==
/// Returns the physical key name for `key` within `namespace`.
///
/// Keys whose namespaced name exceeds [`MAX_KEY_LENGTH`] characters are
/// replaced by the hex SHA-256 digest of the key, still prefixed with the
/// namespace.
pub fn key_name(namespace: &str, key: &str) -> String {
    if namespace.chars().count() + key.chars().count() > MAX_KEY_LENGTH {
        let digest = Sha256::digest(key.as_bytes());
        format!("{}{}", namespace, hex::encode(digest))
    } else {
        format!("{}{}", namespace, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_LENGTH: usize = 64;

    #[test]
    fn test_empty_key() {
        assert_eq!(key_name("", ""), "");
    }

    #[test]
    fn test_short_without_namespace() {
        assert_eq!(key_name("", "whatever"), "whatever");
    }

    #[test]
    fn test_long_without_namespace() {
        let key = "a".repeat(300);
        let name = key_name("", &key);

        assert_ne!(name, key);
        assert_eq!(name.len(), HASH_LENGTH);
    }

    #[test]
    fn test_short_with_namespace() {
        assert_eq!(key_name("prefix", "whatever"), "prefixwhatever");
    }

    #[test]
    fn test_long_with_namespace() {
        let key = "a".repeat(300);
        let name = key_name("prefix", &key);

        assert!(name.starts_with("prefix"));
        assert_eq!(name.len(), "prefix".len() + HASH_LENGTH);
    }

    #[test]
    fn test_namespace_pushes_key_over_limit() {
        let key = "k".repeat(MAX_KEY_LENGTH);
        assert_eq!(key_name("", &key), key);
        assert_eq!(key_name("n", &key).len(), 1 + HASH_LENGTH);
    }

    #[test]
    fn test_hash_is_stable() {
        let key = "b".repeat(400);
        assert_eq!(key_name("ns", &key), key_name("ns", &key));
        assert_ne!(key_name("ns", &key), key_name("ns", &"c".repeat(400)));
    }
}
