//! Fare estimation.
//!
//! `road` and `rail` are pure calculators over a distance or a station pair
//! and the fare configuration; `FareService` wires them to the cached
//! configuration store.

mod error;
pub mod rail;
pub mod road;
mod service;

pub use error::FareError;
pub use rail::{RailFareEstimate, TripKind, estimate as estimate_rail};
pub use road::{FareEstimate, estimate as estimate_road};
pub use service::FareService;
