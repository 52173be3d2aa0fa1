//! Domain types for rail topology and points of interest.
//!
//! Identifiers that have a fixed format are validated at construction time,
//! so code that receives these types can trust their validity.

mod network;
mod poi;
mod station;

pub use network::{RailNetwork, RailNetworkDocument};
pub use poi::{Poi, PoiCatalog};
pub use station::{INTERCITY_SYSTEM, InvalidSystemCode, RailLine, RailStation, StationId, SystemCode};
