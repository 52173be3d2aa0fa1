//! Fare estimation errors.

use crate::config::ConfigError;
use crate::domain::{StationId, SystemCode};

/// Errors from fare estimation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FareError {
    /// Pricing configuration or topology could not be loaded
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(#[from] ConfigError),

    /// The station pair cannot be priced
    #[error("invalid station pair {from} -> {to}: {reason}")]
    InvalidStationPair {
        from: StationId,
        to: StationId,
        reason: &'static str,
    },

    /// The requested intercity fare class has no per-km rate
    #[error("unknown intercity fare class: {0}")]
    UnknownFareClass(String),

    /// An urban system has stations but no fare table
    #[error("no urban fare table for rail system {0}")]
    MissingUrbanPricing(SystemCode),
}

impl FareError {
    /// Whether the caller supplied bad input, as opposed to the service
    /// lacking data.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            FareError::InvalidStationPair { .. } | FareError::UnknownFareClass(_)
        )
    }
}
