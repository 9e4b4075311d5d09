//! Thumbnail-URL cache and the cached resolver in front of the catalog.
//!
//! The cache stores `Option<String>` per object id: `Some(url)` is a
//! resolved image, `None` is "looked up, no image" — a distinct state from
//! "never requested", so failed lookups are not retried. It grows
//! monotonically and lives for the whole session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::fetch::ObjectLookup;

/// Object id → resolved thumbnail URL (or explicit no-image marker).
#[derive(Debug, Default)]
pub struct ThumbCache {
    map: HashMap<String, Option<String>>,
}

impl ThumbCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` means the id was never requested; inner `None` means it
    /// resolved to no image.
    pub fn get(&self, id: &str) -> Option<Option<String>> {
        self.map.get(id).cloned()
    }

    pub fn set(&mut self, id: &str, url: Option<String>) {
        self.map.insert(id.to_string(), url);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Cache-or-fetch resolver over an injected lookup.
///
/// A cached entry (hit or explicit miss) short-circuits without any network
/// call; otherwise the lookup runs once and its outcome — including `None` —
/// is stored before being returned.
pub struct CachedResolver<L: ObjectLookup> {
    cache: Arc<Mutex<ThumbCache>>,
    lookup: L,
}

impl<L: ObjectLookup> CachedResolver<L> {
    pub fn new(cache: Arc<Mutex<ThumbCache>>, lookup: L) -> Self {
        Self { cache, lookup }
    }

    pub fn resolve(&self, id: &str) -> Option<String> {
        if let Some(cached) = self.cache.lock().unwrap().get(id) {
            log::debug!("Thumb cache HIT: {}", id);
            return cached;
        }

        log::debug!("Thumb cache MISS: {}", id);
        let resolved = self.lookup.first_image_url(id);
        self.cache.lock().unwrap().set(id, resolved.clone());
        resolved
    }

    pub fn cache(&self) -> Arc<Mutex<ThumbCache>> {
        Arc::clone(&self.cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts underlying lookups; answers with an image only for ids
    /// starting with "img".
    struct CountingLookup {
        calls: AtomicUsize,
    }

    impl CountingLookup {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ObjectLookup for CountingLookup {
        fn first_image_url(&self, id: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id.starts_with("img") {
                Some(format!("https://ids.si.edu/{}", id))
            } else {
                None
            }
        }
    }

    fn resolver() -> CachedResolver<CountingLookup> {
        CachedResolver::new(
            Arc::new(Mutex::new(ThumbCache::new())),
            CountingLookup::new(),
        )
    }

    #[test]
    fn second_resolve_hits_cache() {
        let r = resolver();
        let first = r.resolve("img-1");
        let second = r.resolve("img-1");
        assert_eq!(first, second);
        assert_eq!(r.lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_image_outcome_is_cached_too() {
        // Scenario: the catalog 404s → the miss is remembered, not retried.
        let r = resolver();
        assert_eq!(r.resolve("gone-404"), None);
        assert_eq!(r.resolve("gone-404"), None);
        assert_eq!(r.lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(r.cache().lock().unwrap().get("gone-404"), Some(None));
    }

    #[test]
    fn unrequested_id_is_distinct_from_no_image() {
        let cache = ThumbCache::new();
        assert_eq!(cache.get("never"), None);
        let mut cache = cache;
        cache.set("empty", None);
        assert_eq!(cache.get("empty"), Some(None));
    }

    #[test]
    fn cache_is_shared_across_resolvers() {
        let shared = Arc::new(Mutex::new(ThumbCache::new()));
        let a = CachedResolver::new(Arc::clone(&shared), CountingLookup::new());
        let b = CachedResolver::new(Arc::clone(&shared), CountingLookup::new());
        a.resolve("img-7");
        assert_eq!(b.resolve("img-7").as_deref(), Some("https://ids.si.edu/img-7"));
        assert_eq!(b.lookup.calls.load(Ordering::SeqCst), 0);
    }
}
