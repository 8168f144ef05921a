// gm-locator/src/search/cache.rs
use crate::location::LocationEntry;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const DEFAULT_TTL_SECS: i64 = 30 * 60;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to exercise cache expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Utc::now())
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub results: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub type SearchCacheMap = HashMap<String, CacheEntry>;

/// Ranked results per normalized query. Entries go stale after `ttl` and are
/// overwritten on the next miss; nothing is evicted otherwise.
pub struct QueryCache {
    entries: Mutex<SearchCacheMap>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(TimeDelta::seconds(DEFAULT_TTL_SECS), Arc::new(SystemClock))
    }
}

impl QueryCache {
    pub fn new(ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Trimmed and lower-cased; no Unicode normalization.
    pub fn key_for(query: &str) -> String {
        query.trim().to_lowercase()
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Fresh results for `key`, if any. Stale entries count as misses but stay
    /// in place until overwritten.
    pub fn get(&self, key: &str) -> Option<Vec<LocationEntry>> {
        let now = self.clock.now();
        let fresh = match self.entries.lock() {
            Ok(cache) => cache
                .get(key)
                .filter(|entry| now - entry.timestamp < self.ttl)
                .map(|entry| entry.results.clone()),
            Err(_) => None,
        };

        let counter = if fresh.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        fresh
    }

    pub fn insert(&self, key: String, results: Vec<LocationEntry>) {
        let Ok(mut cache) = self.entries.lock() else {
            return;
        };
        cache.insert(
            key,
            CacheEntry {
                timestamp: self.clock.now(),
                results,
            },
        );
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.lock() {
            cache.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.lock().map(|cache| cache.len()).unwrap_or(0),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
