//! Memoization of parsed docstrings, keyed by raw docstring text.
//!
//! A `ParsedDoc` is a pure function of its input text, so entries never go
//! stale. The cache is owned by the caller; nothing is global.

use crate::error::Result;
use crate::model::ParsedDoc;
use crate::DocParser;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct DocCache {
    entries: DashMap<String, Arc<ParsedDoc>>,
}

impl DocCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `text`, parsing it on first use.
    /// Failures are returned to the caller and not remembered.
    pub fn get_or_parse(&self, parser: &DocParser, text: &str) -> Result<Arc<ParsedDoc>> {
        if let Some(hit) = self.entries.get(text) {
            return Ok(Arc::clone(hit.value()));
        }
        let parsed = Arc::new(parser.parse(Some(text))?);
        // A concurrent caller may have won the race; keep whichever landed first.
        let entry = self
            .entries
            .entry(text.to_string())
            .or_insert_with(|| Arc::clone(&parsed));
        Ok(Arc::clone(entry.value()))
    }

    pub fn get(&self, text: &str) -> Option<Arc<ParsedDoc>> {
        self.entries.get(text).map(|hit| Arc::clone(hit.value()))
    }

    /// Drop one entry; returns whether it was present.
    pub fn evict(&self, text: &str) -> bool {
        self.entries.remove(text).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Summary.\n\n:param int foo: bar";

    #[test]
    fn repeated_lookups_share_one_entry() {
        let cache = DocCache::new();
        let parser = DocParser::default();
        let first = cache.get_or_parse(&parser, DOC).unwrap();
        let second = cache.get_or_parse(&parser, DOC).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_and_fresh_results_are_equal() {
        let cache = DocCache::new();
        let parser = DocParser::default();
        let cached = cache.get_or_parse(&parser, DOC).unwrap();
        let fresh = parser.parse(Some(DOC)).unwrap();
        assert_eq!(*cached, fresh);
    }

    #[test]
    fn evict_and_clear() {
        let cache = DocCache::new();
        let parser = DocParser::default();
        cache.get_or_parse(&parser, DOC).unwrap();
        cache.get_or_parse(&parser, "Other.").unwrap();
        assert!(cache.evict(DOC));
        assert!(!cache.evict(DOC));
        assert!(cache.get(DOC).is_none());
        assert!(cache.get("Other.").is_some());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = DocCache::new();
        let parser = DocParser::default();
        let bad = ":param foo: a\n:param foo: b";
        assert!(cache.get_or_parse(&parser, bad).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_readers_see_the_same_record() {
        let cache = Arc::new(DocCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let parser = DocParser::default();
                    cache.get_or_parse(&parser, DOC).unwrap().params.len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(cache.len(), 1);
    }
}
