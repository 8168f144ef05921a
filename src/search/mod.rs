// gm-locator/src/search/mod.rs
pub mod cache;
pub mod distance;
pub mod fuzzy;
pub mod rank;

use crate::error::SearchError;
use crate::location::LocationEntry;
use cache::QueryCache;
use tracing::{debug, error};

pub const MIN_QUERY_CHARS: usize = 2;

/// Checks raw user input and returns the trimmed query.
pub fn validate_query(query: &str) -> Result<&str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(SearchError::QueryTooShort);
    }
    Ok(trimmed)
}

pub struct SearchEngine<'a> {
    locations: &'a [LocationEntry],
    /// Shared result cache (lives on LocatorEngine).
    cache: &'a QueryCache,
}

impl<'a> SearchEngine<'a> {
    pub fn new(locations: &'a [LocationEntry], cache: &'a QueryCache) -> Self {
        Self { locations, cache }
    }

    /// Validates, consults the cache, and ranks on a miss. Internal failures
    /// are logged here and reduced to [`SearchError::Internal`].
    pub fn search(&self, query: &str) -> Result<Vec<LocationEntry>, SearchError> {
        let query = validate_query(query)?;

        let cache_key = QueryCache::key_for(query);
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!(query = %query, "using cached search");
            return Ok(cached);
        }

        match rank::rank(query, self.locations) {
            Ok(results) => {
                debug!(query = %query, hits = results.len(), "ranked locations");
                self.cache.insert(cache_key, results.clone());
                Ok(results)
            }
            Err(e) => {
                error!(query = %query, error = %e, "local search failed");
                Err(SearchError::Internal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::bundled_locations;
    use crate::location::sample;
    use super::cache::ManualClock;
    use chrono::{TimeDelta, Utc};
    use std::sync::Arc;

    #[test]
    fn empty_and_blank_queries_ask_for_a_term() {
        assert_eq!(validate_query(""), Err(SearchError::EmptyQuery));
        assert_eq!(validate_query("   "), Err(SearchError::EmptyQuery));
    }

    #[test]
    fn single_char_is_too_short() {
        assert_eq!(validate_query("a"), Err(SearchError::QueryTooShort));
        assert_eq!(validate_query("  a  "), Err(SearchError::QueryTooShort));
    }

    #[test]
    fn valid_query_is_trimmed() {
        assert_eq!(validate_query("  Sale "), Ok("Sale"));
        assert_eq!(validate_query("St"), Ok("St"));
    }

    #[test]
    fn repeated_query_is_served_from_cache() {
        let locations = bundled_locations().unwrap();
        let cache = QueryCache::default();
        let engine = SearchEngine::new(&locations, &cache);

        let first = engine.search("Man").unwrap();
        let second = engine.search("  mAN ").unwrap();
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn stale_entry_is_recomputed() {
        let locations = bundled_locations().unwrap();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = QueryCache::new(TimeDelta::minutes(30), clock.clone());
        let engine = SearchEngine::new(&locations, &cache);

        let first = engine.search("bolton").unwrap();
        clock.advance(TimeDelta::minutes(31));
        let second = engine.search("bolton").unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn validation_failures_skip_the_cache() {
        let locations = bundled_locations().unwrap();
        let cache = QueryCache::default();
        let engine = SearchEngine::new(&locations, &cache);
        assert_eq!(engine.search("a"), Err(SearchError::QueryTooShort));
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn scoring_failure_becomes_internal_error() {
        let locations = vec![sample("bad", "Badland", "town", f64::INFINITY)];
        let cache = QueryCache::default();
        let engine = SearchEngine::new(&locations, &cache);
        assert_eq!(engine.search("bad"), Err(SearchError::Internal));
        assert_eq!(cache.stats().entries, 0);
    }
}
