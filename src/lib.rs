pub mod config;
pub mod dataset;
pub mod error;
pub mod location;
pub mod outcome;
pub mod search;
pub mod stations;
pub mod stdio_server;

use crate::config::LocatorConfig;
use crate::location::LocationEntry;
use crate::outcome::SearchOutcome;
use crate::search::cache::{CacheStats, QueryCache, SystemClock};
use crate::search::SearchEngine;
use crate::stations::{NearbyStation, PoliceStationEntry};
use anyhow::Result;
use std::sync::Arc;

/// Process-scoped owner of the datasets and the query cache.
#[derive(Clone)]
pub struct LocatorEngine {
    locations: Arc<Vec<LocationEntry>>,
    stations: Arc<Vec<PoliceStationEntry>>,
    search_cache: Arc<QueryCache>,
}

impl LocatorEngine {
    /// Bundled datasets, default 30 minute cache.
    pub fn bundled() -> Result<Self> {
        Self::from_config(&LocatorConfig::default())
    }

    pub fn from_config(config: &LocatorConfig) -> Result<Self> {
        let locations = match &config.locations_path {
            Some(path) => dataset::load_locations(path)?,
            None => dataset::bundled_locations()?,
        };
        let stations = match &config.stations_path {
            Some(path) => dataset::load_stations(path)?,
            None => dataset::bundled_stations()?,
        };
        let cache = QueryCache::new(config.cache_ttl, Arc::new(SystemClock));
        Ok(Self::with_data(locations, stations, cache))
    }

    pub fn with_data(
        locations: Vec<LocationEntry>,
        stations: Vec<PoliceStationEntry>,
        search_cache: QueryCache,
    ) -> Self {
        Self {
            locations: Arc::new(locations),
            stations: Arc::new(stations),
            search_cache: Arc::new(search_cache),
        }
    }

    pub fn locations(&self) -> &[LocationEntry] {
        &self.locations
    }

    pub fn stations(&self) -> &[PoliceStationEntry] {
        &self.stations
    }

    pub fn search_cache(&self) -> Arc<QueryCache> {
        self.search_cache.clone()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.search_cache.stats()
    }

    pub fn invalidate_search_cache(&self) {
        self.search_cache.clear();
    }

    /// Ranked matches for a raw search-box query, or a user-facing message.
    /// Never fails: validation and internal errors come back as
    /// [`SearchOutcome::Failed`].
    pub async fn search_locations(&self, query: &str) -> SearchOutcome {
        SearchEngine::new(&self.locations, &self.search_cache)
            .search(query)
            .into()
    }

    /// Autocomplete uses the same ranking as a full search.
    pub async fn get_suggestions(&self, query: &str) -> SearchOutcome {
        self.search_locations(query).await
    }

    pub fn nearest_stations(&self, lat: f64, lon: f64, limit: usize) -> Vec<NearbyStation> {
        stations::nearest_stations(&self.stations, lat, lon, limit)
    }
}
