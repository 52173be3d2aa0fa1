//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RailLine, RailStation};
use crate::itinerary::ItineraryEntry;

/// Query for road fares over a known distance.
#[derive(Debug, Deserialize)]
pub struct RoadFareQuery {
    /// Trip distance in kilometres; missing counts as 0
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Query for road fares between two points.
#[derive(Debug, Deserialize)]
pub struct RoadFareBetweenQuery {
    pub from_lat: f64,
    pub from_lng: f64,
    pub to_lat: f64,
    pub to_lng: f64,
}

/// Request for a rail fare.
#[derive(Debug, Deserialize)]
pub struct RailFareRequest {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,

    /// Intercity fare class (e.g., "express"); ignored for urban trips
    pub class: Option<String>,
}

/// Query for the station listing.
#[derive(Debug, Deserialize)]
pub struct StationListQuery {
    /// Locale for display names (defaults to "en")
    pub locale: Option<String>,
}

/// A station in the listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub system: String,
    pub line_id: String,
    pub lat: f64,
    pub lng: f64,
}

impl StationResult {
    pub fn from_station(station: &RailStation, locale: &str) -> Self {
        Self {
            id: station.id.as_str().to_string(),
            name: station.display_name(locale).to_string(),
            system: station.system.as_str().to_string(),
            line_id: station.line_id.clone(),
            lat: station.lat,
            lng: station.lng,
        }
    }
}

/// Response for the station listing.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// A line in the listing.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: String,
    pub system: String,
    /// Station ids in running order
    pub station_ids: Vec<String>,
}

impl From<&RailLine> for LineResult {
    fn from(line: &RailLine) -> Self {
        Self {
            id: line.id.clone(),
            system: line.system.as_str().to_string(),
            station_ids: line
                .ordered_station_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

/// Response for the line listing.
#[derive(Debug, Serialize)]
pub struct LineListResponse {
    pub lines: Vec<LineResult>,
}

/// Request to add a POI to the itinerary.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub poi_id: String,
}

/// Request to move an itinerary entry.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from_index: usize,
    pub to_index: usize,
}

/// The itinerary in display order.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<ItineraryEntry>,
}

/// Total suggested visit time of the itinerary.
#[derive(Debug, Serialize)]
pub struct TotalMinutesResponse {
    pub total_minutes: u32,
    pub entry_count: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
