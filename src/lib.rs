//! Bounded in-memory object cache with popularity-based eviction.
//!
//! The core of the crate is [`services::PopularityCache`]: a thread-safe
//! store for arbitrary domain objects keyed by a compound identity, holding
//! at most a configured number of entries and evicting the least-requested
//! entry when full. Alongside it live small imaging and URL helpers that
//! typically accompany the cache in a content-serving application.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;
