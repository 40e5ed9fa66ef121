//! Error types for the tiered cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Backend Error Enum ==
/// Failure reported by one of the two backing stores.
///
/// The tiered adapter never hands these to its callers directly: a failing
/// layer is logged, counted, and the operation degrades to the other layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached (e.g. a maintenance window)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend is reachable but refused the operation (e.g. read-only mode)
    #[error("Backend rejected operation: {0}")]
    Rejected(String),
}

/// Result type returned by backend implementations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

// == Cache Error Enum ==
/// Unified error type for the public cache API.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Neither layer could serve the operation
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Value could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache API.
pub type Result<T> = std::result::Result<T, CacheError>;
