//! Rail network topology: stations and lines with id lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{RailLine, RailStation, StationId};

/// Wire shape of the rail network document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailNetworkDocument {
    pub stations: Vec<RailStation>,
    pub lines: Vec<RailLine>,
}

/// Stations and lines of every rail system, indexed by station id.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RailNetworkDocument")]
pub struct RailNetwork {
    stations: Vec<RailStation>,
    lines: Vec<RailLine>,
    by_id: HashMap<StationId, usize>,
}

impl RailNetwork {
    /// Build a network from its stations and lines.
    ///
    /// If a station id appears more than once, the first occurrence wins.
    pub fn new(stations: Vec<RailStation>, lines: Vec<RailLine>) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            by_id.entry(station.id.clone()).or_insert(idx);
        }

        Self {
            stations,
            lines,
            by_id,
        }
    }

    /// Look up a station by id.
    pub fn station(&self, id: &StationId) -> Option<&RailStation> {
        self.by_id.get(id).and_then(|&idx| self.stations.get(idx))
    }

    pub fn stations(&self) -> &[RailStation] {
        &self.stations
    }

    pub fn lines(&self) -> &[RailLine] {
        &self.lines
    }
}

impl From<RailNetworkDocument> for RailNetwork {
    fn from(doc: RailNetworkDocument) -> Self {
        Self::new(doc.stations, doc.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "stations": [
            {"id": "N8", "displayNameByLocale": {"en": "Mo Chit"}, "system": "BTS", "lat": 13.8026, "lng": 100.5538, "lineId": "sukhumvit"},
            {"id": "CEN", "displayNameByLocale": {"en": "Siam"}, "system": "BTS", "lat": 13.7456, "lng": 100.5347, "lineId": "sukhumvit"},
            {"id": "BL13", "displayNameByLocale": {"en": "Sukhumvit"}, "system": "MRT", "lat": 13.7379, "lng": 100.5610, "lineId": "blue"}
        ],
        "lines": [
            {"id": "sukhumvit", "system": "BTS", "orderedStationIds": ["N8", "CEN"], "polylineCoordinates": [{"lat": 13.8026, "lng": 100.5538}]},
            {"id": "blue", "system": "MRT", "orderedStationIds": ["BL13"]}
        ]
    }"#;

    #[test]
    fn decode_and_lookup() {
        let network: RailNetwork = serde_json::from_str(DOC).unwrap();
        assert_eq!(network.stations().len(), 3);
        assert_eq!(network.lines().len(), 2);

        let siam = network.station(&StationId::new("CEN")).unwrap();
        assert_eq!(siam.display_name("en"), "Siam");
        assert!(network.station(&StationId::new("XXX")).is_none());
    }

    #[test]
    fn duplicate_station_first_wins() {
        let mut doc: RailNetworkDocument = serde_json::from_str(DOC).unwrap();
        let mut dup = doc.stations[0].clone();
        dup.lat = 0.0;
        doc.stations.push(dup);

        let network = RailNetwork::from(doc);
        let n8 = network.station(&StationId::new("N8")).unwrap();
        assert_eq!(n8.lat, 13.8026);
    }
}
