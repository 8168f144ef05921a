use serde::{Deserialize, Serialize};

/// A single gazetteer record. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationEntry {
    pub id: String,
    pub name: String,
    /// Hierarchical name, e.g. "Sale, Trafford, Greater Manchester, England, UK".
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Ranking weight in [0, 1]; well-known places sit near the top.
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl LocationEntry {
    /// Flat bonus for major settlement types.
    pub fn type_bonus(&self) -> f64 {
        match self.kind.as_str() {
            "city" => 20.0,
            "town" => 15.0,
            "district" => 10.0,
            _ => 0.0,
        }
    }

    pub fn name_words_start_with(&self, query_lower: &str) -> bool {
        self.name
            .to_lowercase()
            .split_whitespace()
            .any(|word| word.starts_with(query_lower))
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, name: &str, kind: &str, importance: f64) -> LocationEntry {
    LocationEntry {
        id: id.to_string(),
        name: name.to_string(),
        display_name: format!("{name}, Greater Manchester, England, UK"),
        lat: 53.48,
        lon: -2.24,
        kind: kind.to_string(),
        importance,
        population: None,
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_round_trips_as_type() {
        let json = r#"{
            "id": "sale", "name": "Sale",
            "display_name": "Sale, Trafford, Greater Manchester, England, UK",
            "lat": 53.4248, "lon": -2.322, "type": "town", "importance": 0.74
        }"#;
        let entry: LocationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, "town");
        assert!(entry.tags.is_empty());
        assert_eq!(entry.population, None);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "town");
        assert!(value.get("tags").is_none());
        assert!(value.get("population").is_none());
    }

    #[test]
    fn type_bonus_by_kind() {
        assert_eq!(sample("a", "A", "city", 0.5).type_bonus(), 20.0);
        assert_eq!(sample("a", "A", "town", 0.5).type_bonus(), 15.0);
        assert_eq!(sample("a", "A", "district", 0.5).type_bonus(), 10.0);
        assert_eq!(sample("a", "A", "stadium", 0.5).type_bonus(), 0.0);
    }

    #[test]
    fn word_prefix_checks_every_word() {
        let entry = sample("ot", "Old Trafford", "stadium", 0.75);
        assert!(entry.name_words_start_with("traf"));
        assert!(entry.name_words_start_with("old"));
        assert!(!entry.name_words_start_with("ford"));
    }
}
