//! Outcome types returned by the memcache-compatible operations.

use serde::Serialize;

/// Result of `set`, `add` and `replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The value was accepted by at least one layer
    Stored,
    /// `add` found the key already present
    AlreadyExists,
    /// `replace` found no such key
    NotFound,
}

/// Result of `delete`. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// At least one layer held the key
    Deleted,
    /// Neither layer held the key
    Missing,
}
