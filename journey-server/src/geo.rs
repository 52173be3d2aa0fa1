//! Great-circle distance between coordinates.
//!
//! Every fare estimate that starts from two points on the map goes through
//! [`distance_km`], including rail trips priced by stop count (the distance
//! is still reported alongside the price).

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance between `a` and `b` in kilometres.
///
/// Symmetric in its arguments and zero for identical coordinates.
///
/// # Examples
///
/// ```
/// use journey_server::geo::{Coordinate, distance_km};
///
/// let siam = Coordinate::new(13.7456, 100.5347);
/// assert_eq!(distance_km(siam, siam), 0.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);

    // Rounding can push h fractionally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
