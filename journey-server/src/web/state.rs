//! Application state for the web layer.

use std::sync::Arc;

use crate::config::{ConfigSource, ConfigStore};
use crate::fares::FareService;
use crate::itinerary::SharedItinerary;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S> {
    /// Configuration documents (fares, rail network, POIs)
    pub config: Arc<ConfigStore<S>>,

    /// Fare estimation over `config`
    pub fares: FareService<S>,

    /// The itinerary, behind a single-writer lock
    pub itinerary: SharedItinerary,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            fares: self.fares.clone(),
            itinerary: Arc::clone(&self.itinerary),
        }
    }
}

impl<S: ConfigSource> AppState<S> {
    /// Create a new app state.
    pub fn new(config: ConfigStore<S>, itinerary: SharedItinerary) -> Self {
        let config = Arc::new(config);
        Self {
            fares: FareService::new(Arc::clone(&config)),
            config,
            itinerary,
        }
    }
}
