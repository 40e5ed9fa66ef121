//! Result models for the cache API
//!
//! Expected outcomes such as "already exists" or "not found" are ordinary
//! values here, not errors.

pub mod outcomes;

// Re-export commonly used types
pub use outcomes::{DeleteOutcome, WriteOutcome};
