// gm-locator/src/dataset.rs
use crate::location::LocationEntry;
use crate::stations::PoliceStationEntry;
use anyhow::{ensure, Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

const BUNDLED_LOCATIONS: &str = include_str!("../data/manchester_locations.json");
const BUNDLED_STATIONS: &str = include_str!("../data/police_stations.json");

pub fn bundled_locations() -> Result<Vec<LocationEntry>> {
    parse_locations(BUNDLED_LOCATIONS).context("bundled locations dataset is malformed")
}

pub fn bundled_stations() -> Result<Vec<PoliceStationEntry>> {
    parse_stations(BUNDLED_STATIONS).context("bundled police stations dataset is malformed")
}

pub fn load_locations(path: &Path) -> Result<Vec<LocationEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading locations from {}", path.display()))?;
    let locations =
        parse_locations(&raw).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), count = locations.len(), "loaded locations");
    Ok(locations)
}

pub fn load_stations(path: &Path) -> Result<Vec<PoliceStationEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading police stations from {}", path.display()))?;
    let stations = parse_stations(&raw).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), count = stations.len(), "loaded police stations");
    Ok(stations)
}

pub fn parse_locations(raw: &str) -> Result<Vec<LocationEntry>> {
    let locations: Vec<LocationEntry> = serde_json::from_str(raw)?;
    validate_locations(&locations)?;
    Ok(locations)
}

pub fn parse_stations(raw: &str) -> Result<Vec<PoliceStationEntry>> {
    let stations: Vec<PoliceStationEntry> = serde_json::from_str(raw)?;
    validate_stations(&stations)?;
    Ok(stations)
}

/// Ids are unique, names present, importance in [0, 1], coordinates finite.
pub fn validate_locations(locations: &[LocationEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for location in locations {
        ensure!(!location.id.is_empty(), "location with empty id");
        ensure!(seen.insert(location.id.as_str()), "duplicate location id '{}'", location.id);
        ensure!(!location.name.trim().is_empty(), "location '{}' has no name", location.id);
        ensure!(
            (0.0..=1.0).contains(&location.importance),
            "location '{}' importance {} outside [0, 1]",
            location.id,
            location.importance
        );
        ensure!(
            location.lat.is_finite() && location.lon.is_finite(),
            "location '{}' has non-finite coordinates",
            location.id
        );
    }
    Ok(())
}

pub fn validate_stations(stations: &[PoliceStationEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for station in stations {
        ensure!(seen.insert(station.id.as_str()), "duplicate station id '{}'", station.id);
        ensure!(
            station.lat.is_finite() && station.lon.is_finite(),
            "station '{}' has non-finite coordinates",
            station.id
        );
        if !station.within_greater_manchester() {
            warn!(id = %station.id, lat = station.lat, lon = station.lon, "station outside Greater Manchester");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_locations_parse() {
        let locations = bundled_locations().unwrap();
        assert_eq!(locations.len(), 27);
        assert_eq!(locations[0].id, "manchester");
        assert_eq!(locations[0].kind, "city");
        assert_eq!(locations[0].population, Some(547627));
    }

    #[test]
    fn bundled_stations_parse() {
        let stations = bundled_stations().unwrap();
        assert_eq!(stations.len(), 12);
        assert!(stations.iter().any(|s| s.id == "gmp-hq"));
    }

    #[test]
    fn suburbs_have_no_population() {
        let locations = bundled_locations().unwrap();
        let cheadle = locations.iter().find(|l| l.id == "cheadle").unwrap();
        assert_eq!(cheadle.population, None);
        assert_eq!(cheadle.tags, vec!["suburb".to_string()]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let raw = r#"[
            {"id":"sale","name":"Sale","display_name":"Sale","lat":53.4,"lon":-2.3,"type":"town","importance":0.7},
            {"id":"sale","name":"Sale Moor","display_name":"Sale Moor","lat":53.4,"lon":-2.3,"type":"suburb","importance":0.5}
        ]"#;
        let err = parse_locations(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate location id 'sale'"));
    }

    #[test]
    fn importance_out_of_range_rejected() {
        let raw = r#"[{"id":"x","name":"X","display_name":"X","lat":53.4,"lon":-2.3,"type":"town","importance":1.5}]"#;
        assert!(parse_locations(raw).is_err());
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(parse_locations("{not json").is_err());
        assert!(parse_stations("[{\"id\": 1}]").is_err());
    }

    #[test]
    fn load_locations_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"ramsbottom","name":"Ramsbottom","display_name":"Ramsbottom, Bury","lat":53.647,"lon":-2.316,"type":"town","importance":0.5,"tags":["town"]}}]"#
        )
        .unwrap();
        let locations = load_locations(file.path()).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Ramsbottom");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_stations(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}
