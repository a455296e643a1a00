//! Error type definitions for the popularity cache

use thiserror::Error;

/// Errors surfaced by cache operations
///
/// Every instance is reported through the diagnostic sink (`tracing::warn!`)
/// at the failing call site before being returned, with enough context to
/// reconstruct the call. Callers must not rely on the cache swallowing bad
/// input.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required identifier was missing or empty
    #[error("Invalid argument in {operation}: {message}")]
    InvalidArgument { operation: String, message: String },
}

impl CacheError {
    /// Create an invalid argument error for a named operation
    pub fn invalid_argument<O: Into<String>, M: Into<String>>(operation: O, message: M) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
