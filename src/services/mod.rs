//! Service layer
//!
//! Home of the cache itself. The service owns its own synchronization and is
//! handed to callers by the application root (dependency injection rather
//! than ambient global state), which keeps it testable with isolated
//! instances.

pub mod popularity_cache;

// Re-export commonly used types for convenience
pub use popularity_cache::PopularityCache;
