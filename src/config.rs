use crate::search::cache::DEFAULT_TTL_SECS;
use chrono::TimeDelta;
use std::path::PathBuf;

pub const LOCATIONS_VAR: &str = "GM_LOCATOR_LOCATIONS";
pub const STATIONS_VAR: &str = "GM_LOCATOR_STATIONS";
pub const CACHE_TTL_VAR: &str = "GM_LOCATOR_CACHE_TTL_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Overrides the bundled gazetteer when set.
    pub locations_path: Option<PathBuf>,
    pub stations_path: Option<PathBuf>,
    pub cache_ttl: TimeDelta,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            locations_path: None,
            stations_path: None,
            cache_ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
        }
    }
}

impl LocatorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source. Unparseable or negative
    /// TTLs fall back to the default window.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let cache_ttl = lookup(CACHE_TTL_VAR)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|secs| *secs >= 0)
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_else(|| TimeDelta::seconds(DEFAULT_TTL_SECS));

        Self {
            locations_path: path(LOCATIONS_VAR),
            stations_path: path(STATIONS_VAR),
            cache_ttl,
        }
    }
}
