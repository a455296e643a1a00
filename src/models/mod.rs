//! Data types held by the popularity cache

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The opaque value held by a cache entry.
///
/// The cache shares the reference with the caller and never inspects the
/// concrete type; `retrieve_as` recovers it by downcast.
pub type CachedObject = Arc<dyn Any + Send + Sync>;

/// A single cached object plus the metadata that identifies and ranks it
#[derive(Clone)]
pub struct CacheEntry {
    /// Logical kind of the cached object; forms the compound identity together with a key
    pub type_identifier: String,
    /// Numeric identifier; values below 1 mean the secondary key is in effect
    pub primary_key: i64,
    /// Textual identifier used when no numeric key applies
    pub secondary_key: Option<String>,
    /// The cached object itself
    pub value: CachedObject,
    /// Number of successful retrievals; the sole popularity signal for eviction
    pub request_count: u64,
}

impl CacheEntry {
    /// True when this entry is identified by `type_identifier` plus `primary_key`
    pub fn matches_primary(&self, type_identifier: &str, primary_key: i64) -> bool {
        self.primary_key == primary_key && self.type_identifier == type_identifier
    }

    /// True when this entry is identified by `type_identifier` plus `secondary_key`
    pub fn matches_secondary(&self, type_identifier: &str, secondary_key: Option<&str>) -> bool {
        self.secondary_key.as_deref() == secondary_key && self.type_identifier == type_identifier
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("type_identifier", &self.type_identifier)
            .field("primary_key", &self.primary_key)
            .field("secondary_key", &self.secondary_key)
            .field("value", &"<opaque>")
            .field("request_count", &self.request_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_primary() {
        let entry = CacheEntry {
            type_identifier: "Doc".to_string(),
            primary_key: 7,
            secondary_key: None,
            value: Arc::new(()),
            request_count: 0,
        };

        assert!(entry.matches_primary("Doc", 7));
        assert!(!entry.matches_primary("Doc", 8));
        assert!(!entry.matches_primary("Image", 7));
    }

    #[test]
    fn test_matches_secondary() {
        let entry = CacheEntry {
            type_identifier: "Doc".to_string(),
            primary_key: 0,
            secondary_key: Some("front-page".to_string()),
            value: Arc::new(()),
            request_count: 0,
        };

        assert!(entry.matches_secondary("Doc", Some("front-page")));
        assert!(!entry.matches_secondary("Doc", Some("other")));
        assert!(!entry.matches_secondary("Doc", None));
        assert!(!entry.matches_secondary("Image", Some("front-page")));
    }

    #[test]
    fn test_debug_renders_value_opaquely() {
        let entry = CacheEntry {
            type_identifier: "Doc".to_string(),
            primary_key: 1,
            secondary_key: None,
            value: Arc::new("secret".to_string()),
            request_count: 3,
        };

        let rendered = format!("{:?}", entry);
        assert!(rendered.contains("<opaque>"));
        assert!(!rendered.contains("secret"));
    }
}
