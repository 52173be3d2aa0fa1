//! Road fare estimates: metered taxi, tuk-tuk and motorcycle taxi.
//!
//! All functions are pure over the distance and the fare configuration.
//! Distances are clamped to be non-negative before use (NaN and infinities
//! count as 0),
//! so pricing never fails on floating-point noise from upstream.

use serde::Serialize;

use crate::config::{DEFAULT_FIRST_TIER_KM, FareConfig, FareSurcharge, MotoConfig, TaxiTier, TukTukConfig};

/// Moto flat fare covers the first 2 km.
const MOTO_FLAT_KM: f64 = 2.0;

/// Beyond 5 km the moto long-distance rate applies.
const MOTO_MID_KM: f64 = 5.0;

/// Fare estimates for a road trip of a given distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareEstimate {
    pub distance_km: f64,
    pub taxi: f64,
    pub tuk_tuk_min: f64,
    pub tuk_tuk_max: f64,
    pub moto: f64,

    /// Surcharges that may apply to the moto fare. They are not included in
    /// `moto`; callers show them as a separate line item.
    pub moto_surcharge_notes: Vec<FareSurcharge>,
}

/// Clamp a distance to the domain the calculators accept.
pub fn clamp_distance(distance_km: f64) -> f64 {
    if distance_km.is_finite() {
        distance_km.max(0.0)
    } else {
        0.0
    }
}

/// Estimate every road fare for `distance_km`.
///
/// # Examples
///
/// ```
/// use journey_server::config::{FareConfig, MotoConfig, TaxiTier, TukTukConfig};
/// use journey_server::fares::estimate_road;
///
/// let config = FareConfig {
///     taxi: vec![
///         TaxiTier { up_to_km: Some(1.0), rate: 35.0 },
///         TaxiTier { up_to_km: Some(10.0), rate: 6.5 },
///         TaxiTier { up_to_km: None, rate: 5.5 },
///     ],
///     tuktuk: TukTukConfig { base_min: 60.0, base_max: 100.0, per_km_min: 10.0, per_km_max: 20.0 },
///     moto: MotoConfig { base_2km: 25.0, per_km_2_to_5: 5.0, per_km_over_5: 10.0, surcharges: vec![] },
/// };
///
/// let estimate = estimate_road(12.0, &config);
/// assert_eq!(estimate.taxi, 104.5);
/// assert!(estimate.tuk_tuk_max >= estimate.tuk_tuk_min);
/// ```
pub fn estimate(distance_km: f64, config: &FareConfig) -> FareEstimate {
    let distance = clamp_distance(distance_km);
    let (tuk_tuk_min, tuk_tuk_max) = tuk_tuk_range(distance, &config.tuktuk);

    FareEstimate {
        distance_km: distance,
        taxi: taxi_fare(distance, &config.taxi),
        tuk_tuk_min,
        tuk_tuk_max,
        moto: moto_fare(distance, &config.moto),
        moto_surcharge_notes: config.moto.surcharges.clone(),
    }
}

/// Metered taxi fare.
///
/// The first tier's rate is a flat flag-fall covering its distance (1 km
/// when it has no bound). Each later tier charges the distance between the
/// previous bound and its own at its per-km rate; the last tier is
/// unbounded. Validated configs always have a per-km tier after the
/// flag-fall; an empty tier list prices at 0.
pub fn taxi_fare(distance_km: f64, tiers: &[TaxiTier]) -> f64 {
    let distance = clamp_distance(distance_km);
    let Some((first, rest)) = tiers.split_first() else {
        return 0.0;
    };

    let mut total = first.rate;
    let mut covered = first.up_to_km.unwrap_or(DEFAULT_FIRST_TIER_KM);

    for tier in rest {
        if distance <= covered {
            break;
        }
        let upper = tier.up_to_km.unwrap_or(f64::INFINITY);
        let segment = distance.min(upper) - covered;
        if segment > 0.0 {
            total += segment * tier.rate;
        }
        covered = upper;
    }

    total
}

/// Tuk-tuk fare range as `(min, max)`. Tuk-tuks are negotiated, so only a
/// range is given.
pub fn tuk_tuk_range(distance_km: f64, config: &TukTukConfig) -> (f64, f64) {
    let distance = clamp_distance(distance_km);
    let min = config.base_min + distance * config.per_km_min;
    let max = config.base_max + distance * config.per_km_max;
    (min, max)
}

/// Motorcycle taxi fare: flat for 2 km, then the 2-5 km rate, then the
/// long-distance rate. The 2-5 km band is always charged in full once a
/// trip goes beyond 5 km.
pub fn moto_fare(distance_km: f64, config: &MotoConfig) -> f64 {
    let distance = clamp_distance(distance_km);

    if distance <= MOTO_FLAT_KM {
        config.base_2km
    } else if distance <= MOTO_MID_KM {
        config.base_2km + (distance - MOTO_FLAT_KM) * config.per_km_2_to_5
    } else {
        config.base_2km
            + (MOTO_MID_KM - MOTO_FLAT_KM) * config.per_km_2_to_5
            + (distance - MOTO_MID_KM) * config.per_km_over_5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::bangkok_bundle;

    fn config() -> FareConfig {
        bangkok_bundle().fare_config
    }

    #[test]
    fn taxi_twelve_km() {
        // 35 + 9 × 6.5 + 2 × 5.5
        assert_eq!(taxi_fare(12.0, &config().taxi), 104.5);
    }

    #[test]
    fn taxi_within_flag_fall() {
        let tiers = config().taxi;
        assert_eq!(taxi_fare(0.0, &tiers), 35.0);
        assert_eq!(taxi_fare(0.4, &tiers), 35.0);
        assert_eq!(taxi_fare(1.0, &tiers), 35.0);
    }

    #[test]
    fn taxi_inside_second_tier() {
        assert_eq!(taxi_fare(3.0, &config().taxi), 35.0 + 2.0 * 6.5);
    }

    #[test]
    fn taxi_first_tier_defaults_to_one_km() {
        let tiers = vec![
            TaxiTier { up_to_km: None, rate: 35.0 },
            TaxiTier { up_to_km: None, rate: 5.0 },
        ];
        assert_eq!(taxi_fare(1.0, &tiers), 35.0);
        assert_eq!(taxi_fare(3.0, &tiers), 45.0);
    }

    #[test]
    fn taxi_last_tier_absorbs_remaining_distance() {
        let tiers = config().taxi;
        assert_eq!(taxi_fare(50.0, &tiers), 35.0 + 9.0 * 6.5 + 40.0 * 5.5);
    }

    #[test]
    fn negative_and_non_finite_distances_clamp() {
        let cfg = config();
        let zero = estimate(0.0, &cfg);
        assert_eq!(estimate(-3.0, &cfg), zero);
        assert_eq!(estimate(f64::NAN, &cfg), zero);
        assert_eq!(estimate(f64::INFINITY, &cfg), zero);
        assert_eq!(estimate(f64::NEG_INFINITY, &cfg), zero);
    }

    #[test]
    fn tuk_tuk_range_unrounded() {
        let (min, max) = tuk_tuk_range(2.5, &config().tuktuk);
        assert_eq!(min, 85.0);
        assert_eq!(max, 150.0);
    }

    #[test]
    fn moto_bands() {
        let moto = config().moto;
        assert_eq!(moto_fare(0.0, &moto), 25.0);
        assert_eq!(moto_fare(2.0, &moto), 25.0);
        assert_eq!(moto_fare(3.0, &moto), 30.0);
        assert_eq!(moto_fare(5.0, &moto), 25.0 + 3.0 * 5.0);
        assert_eq!(moto_fare(7.0, &moto), 25.0 + 15.0 + 20.0);
    }

    #[test]
    fn surcharges_are_notes_not_added() {
        let cfg = config();
        let estimate = estimate(3.0, &cfg);
        assert_eq!(estimate.moto, 30.0);
        assert_eq!(estimate.moto_surcharge_notes.len(), 1);
        assert_eq!(estimate.moto_surcharge_notes[0].reason, "Late night");
    }

    #[test]
    fn estimate_reports_clamped_distance() {
        assert_eq!(estimate(-1.0, &config()).distance_km, 0.0);
        assert_eq!(estimate(12.5, &config()).distance_km, 12.5);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    /// Strategy for valid tier lists: increasing bounds, last unbounded.
    fn tiers_strategy() -> impl Strategy<Value = Vec<TaxiTier>> {
        (
            0.0f64..100.0,
            prop::collection::vec((0.1f64..20.0, 0.0f64..20.0), 0..5),
            0.0f64..20.0,
        )
            .prop_map(|(base, middle, last_rate)| {
                let mut tiers = vec![TaxiTier { up_to_km: Some(1.0), rate: base }];
                let mut bound = 1.0;
                for (width, rate) in middle {
                    bound += width;
                    tiers.push(TaxiTier { up_to_km: Some(bound), rate });
                }
                tiers.push(TaxiTier { up_to_km: None, rate: last_rate });
                tiers
            })
    }

    fn moto_strategy() -> impl Strategy<Value = MotoConfig> {
        (0.0f64..100.0, 0.0f64..30.0, 0.01f64..30.0).prop_map(|(base, mid, long)| MotoConfig {
            base_2km: base,
            per_km_2_to_5: mid,
            per_km_over_5: long,
            surcharges: Vec::new(),
        })
    }

    fn tuk_tuk_strategy() -> impl Strategy<Value = TukTukConfig> {
        (0.0f64..100.0, 0.0f64..100.0, 0.0f64..30.0, 0.0f64..30.0).prop_map(
            |(base, spread, per_km, per_km_spread)| TukTukConfig {
                base_min: base,
                base_max: base + spread,
                per_km_min: per_km,
                per_km_max: per_km + per_km_spread,
            },
        )
    }

    proptest! {
        #[test]
        fn taxi_non_decreasing(tiers in tiers_strategy(), a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(taxi_fare(lo, &tiers) <= taxi_fare(hi, &tiers) + EPSILON);
        }

        #[test]
        fn taxi_continuous_at_boundaries(tiers in tiers_strategy()) {
            for tier in &tiers {
                if let Some(bound) = tier.up_to_km {
                    let below = taxi_fare(bound - 1e-7, &tiers);
                    let at = taxi_fare(bound, &tiers);
                    let above = taxi_fare(bound + 1e-7, &tiers);
                    // Rates are bounded by 100, so a 1e-7 step moves the fare by at most 1e-5
                    prop_assert!((at - below).abs() < 1e-4);
                    prop_assert!((above - at).abs() < 1e-4);
                }
            }
        }

        #[test]
        fn tuk_tuk_max_at_least_min(config in tuk_tuk_strategy(), d in -10.0f64..500.0) {
            let (min, max) = tuk_tuk_range(d, &config);
            prop_assert!(max >= min);
        }

        #[test]
        fn moto_fixed_points(config in moto_strategy()) {
            prop_assert_eq!(moto_fare(2.0, &config), config.base_2km);
            let at_five = moto_fare(5.0, &config);
            prop_assert!((at_five - (config.base_2km + 3.0 * config.per_km_2_to_5)).abs() < EPSILON);
        }

        #[test]
        fn moto_strictly_increasing_beyond_five(config in moto_strategy(), a in 5.0f64..200.0, step in 0.01f64..50.0) {
            prop_assert!(moto_fare(a + step, &config) > moto_fare(a, &config));
        }
    }
}
