//! Typed pricing configuration.
//!
//! These mirror the `fares_config` document: a bundle holding the road fare
//! configuration and the rail fare configuration. Wire names are the
//! camelCase keys used by the data files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PoiCatalog, RailNetwork, SystemCode};

/// Default upper bound of the first taxi tier when it has none.
pub const DEFAULT_FIRST_TIER_KM: f64 = 1.0;

/// Intercity fares never price below this unless configured otherwise.
pub const DEFAULT_MINIMUM_INTERCITY_FARE: f64 = 20.0;

/// Checks a decoded document against the invariants pricing relies on.
pub trait Validate {
    /// Returns a description of the first violated invariant.
    fn validate(&self) -> Result<(), String>;
}

/// The `fares_config` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBundle {
    pub fare_config: FareConfig,
    pub rail_config: RailConfig,
}

/// Road fare configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareConfig {
    /// Ordered, contiguous distance tiers. The first tier's rate is a flat
    /// base fare.
    pub taxi: Vec<TaxiTier>,
    pub tuktuk: TukTukConfig,
    pub moto: MotoConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxiTier {
    /// Upper bound of this tier; `None` means unbounded (or 1 km for the
    /// first tier).
    #[serde(default)]
    pub up_to_km: Option<f64>,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TukTukConfig {
    pub base_min: f64,
    pub base_max: f64,
    pub per_km_min: f64,
    pub per_km_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotoConfig {
    #[serde(rename = "base2km")]
    pub base_2km: f64,
    #[serde(rename = "perKm_2_5", alias = "perKm_2to5")]
    pub per_km_2_to_5: f64,
    #[serde(rename = "perKm_gt5")]
    pub per_km_over_5: f64,
    #[serde(default)]
    pub surcharges: Vec<FareSurcharge>,
}

/// An advisory surcharge disclosed alongside a moto estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareSurcharge {
    pub reason: String,
    pub amount: f64,
}

/// Rail fare configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailConfig {
    pub urban_rail: BTreeMap<SystemCode, UrbanRailPricing>,
    pub intercity_rail: IntercityRailPricing,

    /// Trips on this system are always priced as intercity.
    #[serde(default = "default_intercity_system")]
    pub intercity_system: SystemCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrbanRailPricing {
    pub base: f64,
    /// Increment charged for the n-th stop; the last entry repeats.
    pub per_stop: Vec<f64>,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntercityRailPricing {
    pub base_per_km: BTreeMap<String, f64>,
    #[serde(default)]
    pub class_surcharge: BTreeMap<String, f64>,
    pub night_surcharge: f64,

    #[serde(default = "default_minimum_fare")]
    pub minimum_fare: f64,

    /// Class used when the caller does not pick one. When absent the class
    /// with the lowest per-km rate is used.
    #[serde(default)]
    pub default_class: Option<String>,
}

fn default_intercity_system() -> SystemCode {
    SystemCode::intercity()
}

fn default_minimum_fare() -> f64 {
    DEFAULT_MINIMUM_INTERCITY_FARE
}

/// Fails unless `value` is finite and non-negative.
fn non_negative(value: f64, what: impl FnOnce() -> String) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a non-negative number, got {value}", what()))
    }
}

impl Validate for FareBundle {
    fn validate(&self) -> Result<(), String> {
        self.fare_config.validate()?;
        self.rail_config.validate()
    }
}

impl Validate for FareConfig {
    fn validate(&self) -> Result<(), String> {
        // A flag-fall alone would leave distance past its bound uncharged
        if self.taxi.len() < 2 {
            return Err("taxi needs a flag-fall tier followed by per-km tiers".to_string());
        }
        if let Some(tier) = self.taxi.last()
            && tier.up_to_km.is_some()
        {
            return Err("last taxi tier must have no upper bound".to_string());
        }

        let last = self.taxi.len() - 1;
        let mut previous_upper: Option<f64> = None;

        for (idx, tier) in self.taxi.iter().enumerate() {
            non_negative(tier.rate, || format!("taxi tier {idx} rate"))?;

            let upper = match (idx, tier.up_to_km) {
                (_, Some(upper)) => upper,
                (0, None) => DEFAULT_FIRST_TIER_KM,
                (i, None) if i == last => break,
                (i, None) => return Err(format!("taxi tier {i} has no upper bound but is not last")),
            };

            non_negative(upper, || format!("taxi tier {idx} upToKm"))?;
            if let Some(prev) = previous_upper
                && upper <= prev
            {
                return Err(format!(
                    "taxi tier {idx} upper bound {upper} does not exceed previous bound {prev}"
                ));
            }
            previous_upper = Some(upper);
        }

        let t = &self.tuktuk;
        non_negative(t.base_min, || "tuktuk baseMin".into())?;
        non_negative(t.base_max, || "tuktuk baseMax".into())?;
        non_negative(t.per_km_min, || "tuktuk perKmMin".into())?;
        non_negative(t.per_km_max, || "tuktuk perKmMax".into())?;
        if t.base_max < t.base_min || t.per_km_max < t.per_km_min {
            return Err("tuktuk maximum must not be below minimum".to_string());
        }

        let m = &self.moto;
        non_negative(m.base_2km, || "moto base2km".into())?;
        non_negative(m.per_km_2_to_5, || "moto perKm_2_5".into())?;
        non_negative(m.per_km_over_5, || "moto perKm_gt5".into())?;
        for s in &m.surcharges {
            non_negative(s.amount, || format!("moto surcharge '{}'", s.reason))?;
        }

        Ok(())
    }
}

impl Validate for RailConfig {
    fn validate(&self) -> Result<(), String> {
        for (system, pricing) in &self.urban_rail {
            non_negative(pricing.base, || format!("{system} base"))?;
            non_negative(pricing.max, || format!("{system} max"))?;
            for (i, inc) in pricing.per_stop.iter().enumerate() {
                non_negative(*inc, || format!("{system} perStop[{i}]"))?;
            }
            if pricing.max < pricing.base {
                return Err(format!(
                    "{system} max {} is below base {}",
                    pricing.max, pricing.base
                ));
            }
        }

        let ic = &self.intercity_rail;
        if ic.base_per_km.is_empty() {
            return Err("intercity basePerKm has no fare classes".to_string());
        }
        for (class, rate) in &ic.base_per_km {
            non_negative(*rate, || format!("intercity basePerKm[{class}]"))?;
        }
        for (class, amount) in &ic.class_surcharge {
            non_negative(*amount, || format!("intercity classSurcharge[{class}]"))?;
        }
        non_negative(ic.night_surcharge, || "intercity nightSurcharge".into())?;
        non_negative(ic.minimum_fare, || "intercity minimumFare".into())?;
        if let Some(class) = &ic.default_class
            && !ic.base_per_km.contains_key(class)
        {
            return Err(format!("intercity defaultClass '{class}' has no basePerKm rate"));
        }

        Ok(())
    }
}

impl Validate for RailNetwork {
    fn validate(&self) -> Result<(), String> {
        for station in self.stations() {
            if !(-90.0..=90.0).contains(&station.lat) || !(-180.0..=180.0).contains(&station.lng) {
                return Err(format!("station {} has an out-of-range coordinate", station.id));
            }
        }
        Ok(())
    }
}

impl Validate for PoiCatalog {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A bundle shaped like the shipped Bangkok data.
    pub fn bangkok_bundle() -> FareBundle {
        serde_json::from_str(BANGKOK_FARES).unwrap()
    }

    pub const BANGKOK_FARES: &str = r#"{
        "fareConfig": {
            "taxi": [
                {"upToKm": 1, "rate": 35},
                {"upToKm": 10, "rate": 6.5},
                {"rate": 5.5}
            ],
            "tuktuk": {"baseMin": 60, "baseMax": 100, "perKmMin": 10, "perKmMax": 20},
            "moto": {
                "base2km": 25, "perKm_2_5": 5, "perKm_gt5": 10,
                "surcharges": [{"reason": "Late night", "amount": 10}]
            }
        },
        "railConfig": {
            "urbanRail": {
                "BTS": {"base": 16, "perStop": [0, 7, 7, 7, 14, 14], "max": 42},
                "MRT": {"base": 17, "perStop": [2, 3, 2, 3], "max": 43}
            },
            "intercityRail": {
                "basePerKm": {"express": 1.2, "rapid": 0.8},
                "classSurcharge": {"express": 80, "rapid": 0},
                "nightSurcharge": 150
            }
        }
    }"#;
}
