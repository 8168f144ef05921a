use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate Greater Manchester bounding box.
pub const GM_MIN_LAT: f64 = 53.3381;
pub const GM_MAX_LAT: f64 = 53.6717;
pub const GM_MIN_LON: f64 = -2.7858;
pub const GM_MAX_LON: f64 = -1.9094;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoliceStationEntry {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: PoliceStationEntry,
    pub distance_km: f64,
}

impl PoliceStationEntry {
    pub fn within_greater_manchester(&self) -> bool {
        within_greater_manchester(self.lat, self.lon)
    }
}

pub fn within_greater_manchester(lat: f64, lon: f64) -> bool {
    (GM_MIN_LAT..=GM_MAX_LAT).contains(&lat) && (GM_MIN_LON..=GM_MAX_LON).contains(&lon)
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// The `limit` closest stations to a point, nearest first.
pub fn nearest_stations(
    stations: &[PoliceStationEntry],
    lat: f64,
    lon: f64,
    limit: usize,
) -> Vec<NearbyStation> {
    let mut nearby: Vec<NearbyStation> = stations
        .iter()
        .map(|station| NearbyStation {
            distance_km: haversine_km(lat, lon, station.lat, station.lon),
            station: station.clone(),
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby.truncate(limit);
    nearby
}
