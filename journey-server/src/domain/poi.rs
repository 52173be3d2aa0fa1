//! Points of interest that can be added to an itinerary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A point of interest from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub area: String,
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Suggested visit time.
    pub minutes: u32,

    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// The POI catalog, indexed by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Vec<Poi>")]
pub struct PoiCatalog {
    pois: Vec<Poi>,
    by_id: HashMap<String, usize>,
}

impl PoiCatalog {
    pub fn new(pois: Vec<Poi>) -> Self {
        let mut by_id = HashMap::with_capacity(pois.len());
        for (idx, poi) in pois.iter().enumerate() {
            by_id.entry(poi.id.clone()).or_insert(idx);
        }
        Self { pois, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.by_id.get(id).and_then(|&idx| self.pois.get(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn all(&self) -> &[Poi] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

impl From<Vec<Poi>> for PoiCatalog {
    fn from(pois: Vec<Poi>) -> Self {
        Self::new(pois)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_catalog() {
        let json = r#"[
            {"id": "wat-pho", "name": "Wat Pho", "area": "Rattanakosin", "rating": 4.8,
             "tags": ["Temple"], "minutes": 90, "latitude": 13.7465, "longitude": 100.4927},
            {"id": "chatuchak", "name": "Chatuchak Market", "area": "Chatuchak", "rating": 4.6,
             "minutes": 180, "latitude": 13.7999, "longitude": 100.5507, "images": ["jj.jpg"]}
        ]"#;

        let catalog: PoiCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("wat-pho"));
        assert_eq!(catalog.get("chatuchak").unwrap().minutes, 180);
        assert!(catalog.get("chatuchak").unwrap().tags.is_empty());
        assert!(catalog.get("grand-palace").is_none());
    }
}
