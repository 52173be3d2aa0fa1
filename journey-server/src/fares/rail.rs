//! Rail fare estimates.
//!
//! A trip between two stations of the same urban system (BTS, MRT,
//! airport link...) is priced by the number of stops travelled. Anything
//! else, including trips wholly on the intercity system, is priced by
//! great-circle distance with class and night surcharges.

use serde::Serialize;
use tracing::warn;

use crate::config::{IntercityRailPricing, RailConfig, UrbanRailPricing};
use crate::domain::{RailLine, RailStation, SystemCode};
use crate::geo::distance_km;

use super::error::FareError;

/// Intercity trips longer than this are assumed to run overnight.
pub const NIGHT_SURCHARGE_THRESHOLD_KM: f64 = 150.0;

/// A priced rail trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailFareEstimate {
    /// System the fare is charged on; the intercity system for intercity trips.
    pub system: SystemCode,
    pub distance_km: f64,
    /// Stops travelled; always 0 for intercity trips.
    pub stop_count: usize,
    pub price: f64,
    pub is_urban: bool,
}

/// How a station pair is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripKind {
    Urban,
    Intercity,
}

/// Classify a trip. Same-system trips are urban unless the system is the
/// intercity system.
pub fn classify(from: &RailStation, to: &RailStation, intercity_system: &SystemCode) -> TripKind {
    if from.system == to.system && &from.system != intercity_system {
        TripKind::Urban
    } else {
        TripKind::Intercity
    }
}

/// Price a trip between two stations.
///
/// `lines` is the network's line list; only lines of the origin's system
/// are consulted. `class` selects the intercity fare class; `None` uses the
/// default class (see [`resolve_class`]).
pub fn estimate(
    from: &RailStation,
    to: &RailStation,
    config: &RailConfig,
    lines: &[RailLine],
    class: Option<&str>,
) -> Result<RailFareEstimate, FareError> {
    if from.id == to.id {
        return Err(FareError::InvalidStationPair {
            from: from.id.clone(),
            to: to.id.clone(),
            reason: "origin and destination are the same station",
        });
    }

    let distance = distance_km(from.coordinate(), to.coordinate());

    match classify(from, to, &config.intercity_system) {
        TripKind::Urban => {
            let pricing = config
                .urban_rail
                .get(&from.system)
                .ok_or_else(|| FareError::MissingUrbanPricing(from.system.clone()))?;
            let stops = stop_count(from, to, lines);

            Ok(RailFareEstimate {
                system: from.system.clone(),
                distance_km: distance,
                stop_count: stops,
                price: urban_price(stops, pricing),
                is_urban: true,
            })
        }
        TripKind::Intercity => {
            let pricing = &config.intercity_rail;
            let class = resolve_class(pricing, class)?;

            Ok(RailFareEstimate {
                system: config.intercity_system.clone(),
                distance_km: distance,
                stop_count: 0,
                price: intercity_price(distance, pricing, class),
                is_urban: false,
            })
        }
    }
}

/// Stops between two stations on the first line of the origin's system that
/// serves both. Returns 0 when no such line exists, which prices the trip at
/// the base fare.
pub fn stop_count(from: &RailStation, to: &RailStation, lines: &[RailLine]) -> usize {
    let found = lines
        .iter()
        .filter(|line| line.system == from.system)
        .find_map(|line| line.stops_between(&from.id, &to.id));

    match found {
        Some(stops) => stops,
        None => {
            warn!(
                from = %from.id,
                to = %to.id,
                system = %from.system,
                "no single line serves both stations; pricing at base fare"
            );
            0
        }
    }
}

/// Urban fare for a number of stops.
///
/// Starts from `base` and adds the per-stop increment for each stop (the
/// last configured increment repeats), stopping as soon as `max` is reached.
pub fn urban_price(stops: usize, pricing: &UrbanRailPricing) -> f64 {
    if stops == 0 {
        return pricing.base.min(pricing.max);
    }

    let fallback = pricing.per_stop.last().copied().unwrap_or(0.0);
    let mut total = pricing.base;

    for i in 0..stops {
        total += pricing.per_stop.get(i).copied().unwrap_or(fallback);
        if total >= pricing.max {
            return pricing.max;
        }
    }

    total
}

/// Pick the intercity fare class.
///
/// An explicitly requested class must have a per-km rate. Otherwise the
/// configured default class is used, or failing that the class with the
/// lowest per-km rate (ties broken by class name).
pub fn resolve_class<'a>(
    pricing: &'a IntercityRailPricing,
    requested: Option<&'a str>,
) -> Result<&'a str, FareError> {
    if let Some(class) = requested {
        return if pricing.base_per_km.contains_key(class) {
            Ok(class)
        } else {
            Err(FareError::UnknownFareClass(class.to_string()))
        };
    }

    if let Some(class) = pricing.default_class.as_deref() {
        return Ok(class);
    }

    // BTreeMap iterates in name order, so min_by keeps the first of equal rates
    pricing
        .base_per_km
        .iter()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(class, _)| class.as_str())
        .ok_or_else(|| FareError::UnknownFareClass(String::new()))
}

/// Intercity fare for `distance_km` in `class`, never below the minimum fare.
pub fn intercity_price(distance_km: f64, pricing: &IntercityRailPricing, class: &str) -> f64 {
    let rate = pricing.base_per_km.get(class).copied().unwrap_or(0.0);
    let surcharge = pricing.class_surcharge.get(class).copied().unwrap_or(0.0);

    let mut price = distance_km * rate + surcharge;
    if distance_km > NIGHT_SURCHARGE_THRESHOLD_KM {
        price += pricing.night_surcharge;
    }

    price.max(pricing.minimum_fare)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use crate::domain::{RailLine, RailStation, StationId, SystemCode};

    pub fn station(id: &str, system: &str, lat: f64, lng: f64) -> RailStation {
        RailStation {
            id: StationId::new(id),
            display_name_by_locale: BTreeMap::new(),
            system: SystemCode::parse(system).unwrap(),
            lat,
            lng,
            line_id: String::new(),
        }
    }

    pub fn line(id: &str, system: &str, stations: &[&str]) -> RailLine {
        RailLine {
            id: id.to_string(),
            system: SystemCode::parse(system).unwrap(),
            ordered_station_ids: stations.iter().map(|s| StationId::new(*s)).collect(),
            polyline_coordinates: Vec::new(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::BTreeMap;

    use super::*;
    use proptest::prelude::*;

    fn urban_strategy() -> impl Strategy<Value = UrbanRailPricing> {
        (
            0.0f64..50.0,
            prop::collection::vec(0.0f64..20.0, 0..10),
            0.0f64..100.0,
        )
            .prop_map(|(base, per_stop, headroom)| UrbanRailPricing {
                base,
                per_stop,
                max: base + headroom,
            })
    }

    fn intercity_strategy() -> impl Strategy<Value = IntercityRailPricing> {
        (0.0f64..5.0, 0.0f64..200.0, 0.0f64..300.0, 0.0f64..100.0).prop_map(
            |(rate, surcharge, night, floor)| IntercityRailPricing {
                base_per_km: BTreeMap::from([("standard".to_string(), rate)]),
                class_surcharge: BTreeMap::from([("standard".to_string(), surcharge)]),
                night_surcharge: night,
                minimum_fare: floor,
                default_class: None,
            },
        )
    }

    proptest! {
        #[test]
        fn urban_non_decreasing_and_capped(pricing in urban_strategy(), stops in 0usize..60) {
            let here = urban_price(stops, &pricing);
            let next = urban_price(stops + 1, &pricing);
            prop_assert!(here <= next);
            prop_assert!(next <= pricing.max);
        }

        #[test]
        fn intercity_never_below_floor(pricing in intercity_strategy(), d in 0.0f64..1000.0) {
            prop_assert!(intercity_price(d, &pricing, "standard") >= pricing.minimum_fare);
        }

        #[test]
        fn night_surcharge_adds_exactly(pricing in intercity_strategy(), d in 150.001f64..1000.0) {
            let without = d * pricing.base_per_km["standard"] + pricing.class_surcharge["standard"];
            let expected = (without + pricing.night_surcharge).max(pricing.minimum_fare);
            let price = intercity_price(d, &pricing, "standard");
            prop_assert!((price - expected).abs() < 1e-9, "{} != {}", price, expected);
        }
    }
}
