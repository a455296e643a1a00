//! Centralized error handling for the popularity cache
//!
//! Invalid input is the only failure mode the cache surfaces: it is pure
//! in-memory logic with no transient failures. Retrieval misses, removal of
//! unknown identities and duplicate inserts are normal outcomes and are
//! represented as absent results or no-ops, never as errors.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using CacheError
pub type CacheResult<T> = Result<T, CacheError>;
