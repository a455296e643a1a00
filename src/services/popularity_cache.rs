//! Popularity-ranked object cache
//!
//! Holds a bounded collection of opaque domain objects keyed by a compound
//! identity (type identifier plus a numeric or textual key). Every
//! successful retrieval bumps the entry's request count, and when the cache
//! is full the least-requested entry is evicted to make room.

use std::any::Any;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{CacheError, CacheResult};
use crate::models::{CacheEntry, CachedObject};

/// Everything guarded by the cache lock.
///
/// The ceiling lives here so an insert reads a consistent value within its
/// own critical section even while another thread is changing it.
struct CacheState {
    /// Entries in insertion order; eviction ties resolve to the oldest
    entries: Vec<CacheEntry>,
    /// Maximum number of entries, enforced on the next insert
    item_ceiling: usize,
}

/// Bounded, thread-safe store for arbitrary domain objects with
/// popularity-based eviction.
///
/// All structural operations serialize on one coarse mutex over the whole
/// collection: the duplicate check and the eviction scan both need a
/// consistent view of every entry. The lock is only ever held for an
/// in-memory pass, never across I/O, so no operation blocks indefinitely.
pub struct PopularityCache {
    state: Mutex<CacheState>,
}

impl PopularityCache {
    /// Creates a cache that holds at most `item_ceiling` entries
    pub fn new(item_ceiling: usize) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: Vec::new(),
                item_ceiling,
            }),
        }
    }

    /// Creates a cache sized from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache.max_items)
    }

    /// Adds a new object to the cache.
    ///
    /// The effective key is `primary_key` when it is positive, otherwise
    /// `secondary_key`. Inserting an identity that is already cached leaves
    /// the existing entry untouched and only logs a warning; the caller sees
    /// success. When the cache is at capacity the least-requested entry is
    /// evicted first.
    pub fn insert(
        &self,
        value: CachedObject,
        type_identifier: &str,
        primary_key: i64,
        secondary_key: Option<&str>,
    ) -> CacheResult<()> {
        if type_identifier.is_empty() {
            warn!(
                "insert: type_identifier is empty - primary_key: '{}', secondary_key: '{:?}'",
                primary_key, secondary_key
            );
            return Err(CacheError::invalid_argument(
                "insert",
                "type_identifier must not be empty",
            ));
        }

        let secondary_key = normalize_key(secondary_key);

        let mut state = self.state.lock().unwrap();

        let already_cached = if primary_key > 0 {
            state
                .entries
                .iter()
                .any(|entry| entry.matches_primary(type_identifier, primary_key))
        } else {
            state
                .entries
                .iter()
                .any(|entry| entry.matches_secondary(type_identifier, secondary_key))
        };

        if already_cached {
            warn!(
                "insert: entry already cached - type_identifier: '{}', primary_key: '{}', secondary_key: '{:?}'",
                type_identifier, primary_key, secondary_key
            );
            return Ok(());
        }

        if state.entries.len() >= state.item_ceiling {
            Self::evict_least_requested(&mut state);
        }

        state.entries.push(CacheEntry {
            type_identifier: type_identifier.to_string(),
            primary_key,
            secondary_key: secondary_key.map(str::to_string),
            value,
            request_count: 0,
        });

        Ok(())
    }

    /// Removes the entry identified by `type_identifier` plus `primary_key`.
    ///
    /// Removing an identity that is not cached is a no-op; removal is
    /// idempotent.
    pub fn remove_by_primary_key(
        &self,
        type_identifier: &str,
        primary_key: i64,
    ) -> CacheResult<()> {
        if type_identifier.is_empty() {
            warn!(
                "remove_by_primary_key: type_identifier is empty - primary_key: '{}'",
                primary_key
            );
            return Err(CacheError::invalid_argument(
                "remove_by_primary_key",
                "type_identifier must not be empty",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if let Some(index) = state
            .entries
            .iter()
            .position(|entry| entry.matches_primary(type_identifier, primary_key))
        {
            state.entries.remove(index);
        }

        Ok(())
    }

    /// Removes the entry identified by `type_identifier` plus `secondary_key`.
    ///
    /// Removing an identity that is not cached is a no-op; removal is
    /// idempotent.
    pub fn remove_by_secondary_key(
        &self,
        type_identifier: &str,
        secondary_key: &str,
    ) -> CacheResult<()> {
        if type_identifier.is_empty() {
            warn!(
                "remove_by_secondary_key: type_identifier is empty - secondary_key: '{}'",
                secondary_key
            );
            return Err(CacheError::invalid_argument(
                "remove_by_secondary_key",
                "type_identifier must not be empty",
            ));
        }

        if secondary_key.is_empty() {
            warn!(
                "remove_by_secondary_key: secondary_key is empty - type_identifier: '{}'",
                type_identifier
            );
            return Err(CacheError::invalid_argument(
                "remove_by_secondary_key",
                "secondary_key must not be empty",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if let Some(index) = state
            .entries
            .iter()
            .position(|entry| entry.matches_secondary(type_identifier, Some(secondary_key)))
        {
            state.entries.remove(index);
        }

        Ok(())
    }

    /// Collects an object that was cached previously.
    ///
    /// The effective key resolves exactly as in [`insert`](Self::insert).
    /// A hit increments the entry's request count and returns the stored
    /// value; a miss is `Ok(None)`, distinct from failure.
    pub fn retrieve(
        &self,
        type_identifier: &str,
        primary_key: i64,
        secondary_key: Option<&str>,
    ) -> CacheResult<Option<CachedObject>> {
        let secondary_key = normalize_key(secondary_key);

        if primary_key < 1 && secondary_key.is_none() {
            warn!(
                "retrieve: both keys are empty - type_identifier: '{}'",
                type_identifier
            );
            return Err(CacheError::invalid_argument(
                "retrieve",
                "either primary_key or secondary_key is required",
            ));
        }

        if type_identifier.is_empty() {
            warn!(
                "retrieve: type_identifier is empty - primary_key: '{}', secondary_key: '{:?}'",
                primary_key, secondary_key
            );
            return Err(CacheError::invalid_argument(
                "retrieve",
                "type_identifier must not be empty",
            ));
        }

        let mut state = self.state.lock().unwrap();
        let entry = if primary_key > 0 {
            state
                .entries
                .iter_mut()
                .find(|entry| entry.matches_primary(type_identifier, primary_key))
        } else {
            state
                .entries
                .iter_mut()
                .find(|entry| entry.matches_secondary(type_identifier, secondary_key))
        };

        // The increment shares the lookup's critical section so concurrent
        // retrievals of one entry never lose updates.
        Ok(entry.map(|entry| {
            entry.request_count += 1;
            Arc::clone(&entry.value)
        }))
    }

    /// Typed variant of [`retrieve`](Self::retrieve).
    ///
    /// A cached value of a different concrete type is reported as a miss.
    pub fn retrieve_as<T: Any + Send + Sync>(
        &self,
        type_identifier: &str,
        primary_key: i64,
        secondary_key: Option<&str>,
    ) -> CacheResult<Option<Arc<T>>> {
        Ok(self
            .retrieve(type_identifier, primary_key, secondary_key)?
            .and_then(|value| value.downcast::<T>().ok()))
    }

    /// Empties the cache of all entries
    pub fn flush(&self) {
        let mut state = self.state.lock().unwrap();
        let flushed = state.entries.len();
        state.entries.clear();
        debug!("flush: dropped {} entries", flushed);
    }

    /// Returns up to `count` entries ordered by request count, most popular
    /// first. Ties keep insertion order, so the result is deterministic for
    /// a fixed cache state; `count` of zero yields nothing.
    pub fn top_popular(&self, count: usize) -> Vec<CacheEntry> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<CacheEntry> = state.entries.clone();
        entries.sort_by(|a, b| b.request_count.cmp(&a.request_count));
        entries.truncate(count);
        entries
    }

    /// Current number of entries
    pub fn item_count(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    /// Configured maximum number of entries
    pub fn item_ceiling(&self) -> usize {
        self.state.lock().unwrap().item_ceiling
    }

    /// Changes the maximum number of entries.
    ///
    /// Takes effect on the next insert; lowering the ceiling below the
    /// current count does not evict anything retroactively.
    pub fn set_item_ceiling(&self, item_ceiling: usize) {
        let mut state = self.state.lock().unwrap();
        state.item_ceiling = item_ceiling;
        debug!("item ceiling set to {}", item_ceiling);
    }

    /// Share of the configured capacity currently in use, as a percentage.
    /// Zero when the cache is empty or the ceiling is zero.
    pub fn capacity_used_percent(&self) -> f64 {
        let state = self.state.lock().unwrap();
        if state.item_ceiling == 0 || state.entries.is_empty() {
            return 0.0;
        }

        state.entries.len() as f64 / state.item_ceiling as f64 * 100.0
    }

    /// Drops the entry with the lowest request count to make room.
    ///
    /// Ties resolve to the earliest-inserted entry. Removes at most one
    /// entry per call.
    fn evict_least_requested(state: &mut CacheState) {
        let candidate = state
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry.request_count)
            .map(|(index, _)| index);

        if let Some(index) = candidate {
            let evicted = state.entries.remove(index);
            debug!(
                "evicted least-requested entry - type_identifier: '{}', primary_key: '{}', secondary_key: '{:?}', request_count: {}",
                evicted.type_identifier,
                evicted.primary_key,
                evicted.secondary_key,
                evicted.request_count
            );
        }
    }
}

/// Treats an empty secondary key the same as an absent one
fn normalize_key(secondary_key: Option<&str>) -> Option<&str> {
    secondary_key.filter(|key| !key.is_empty())
}
