//! Fare estimation backed by the configuration store.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigSource, ConfigStore};
use crate::domain::{RailNetwork, StationId};
use crate::geo::{Coordinate, distance_km};

use super::error::FareError;
use super::rail::{self, RailFareEstimate};
use super::road::{self, FareEstimate};

/// Prices road and rail trips using the shared configuration.
///
/// Configuration is loaded on first use; if it cannot be loaded every
/// estimate fails with [`FareError::ConfigUnavailable`].
pub struct FareService<S> {
    store: Arc<ConfigStore<S>>,
}

impl<S> Clone for FareService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ConfigSource> FareService<S> {
    pub fn new(store: Arc<ConfigStore<S>>) -> Self {
        Self { store }
    }

    /// Road fares for a known distance.
    pub async fn road_estimate(&self, distance_km: f64) -> Result<FareEstimate, FareError> {
        let bundle = self.store.fares().await?;
        let estimate = road::estimate(distance_km, &bundle.fare_config);
        debug!(distance_km = estimate.distance_km, taxi = estimate.taxi, "road estimate");
        Ok(estimate)
    }

    /// Road fares for the great-circle distance between two points.
    pub async fn road_estimate_between(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<FareEstimate, FareError> {
        self.road_estimate(distance_km(from, to)).await
    }

    /// Rail fare between two stations identified by id.
    pub async fn rail_estimate(
        &self,
        from: &StationId,
        to: &StationId,
        class: Option<&str>,
    ) -> Result<RailFareEstimate, FareError> {
        if from == to {
            return Err(FareError::InvalidStationPair {
                from: from.clone(),
                to: to.clone(),
                reason: "origin and destination are the same station",
            });
        }

        let network = self.store.rail_network().await?;
        let origin = network
            .station(from)
            .ok_or_else(|| FareError::InvalidStationPair {
                from: from.clone(),
                to: to.clone(),
                reason: "unknown origin station",
            })?;
        let destination = network
            .station(to)
            .ok_or_else(|| FareError::InvalidStationPair {
                from: from.clone(),
                to: to.clone(),
                reason: "unknown destination station",
            })?;

        let bundle = self.store.fares().await?;
        let estimate = rail::estimate(
            origin,
            destination,
            &bundle.rail_config,
            network.lines(),
            class,
        )?;

        debug!(
            %from,
            %to,
            system = %estimate.system,
            urban = estimate.is_urban,
            stops = estimate.stop_count,
            price = estimate.price,
            "rail estimate"
        );
        Ok(estimate)
    }

    /// The rail network, for station and line listings.
    pub async fn rail_network(&self) -> Result<Arc<RailNetwork>, FareError> {
        Ok(self.store.rail_network().await?)
    }
}
