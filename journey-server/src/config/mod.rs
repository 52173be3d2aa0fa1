//! Pricing configuration and reference data.
//!
//! Documents are fetched once from a pluggable byte source, decoded into
//! typed structures, validated, and then shared read-only by the fare
//! calculators for the lifetime of the process.

mod error;
mod source;
mod store;
mod types;

pub use error::ConfigError;
pub use source::{
    ConfigSource, DataSource, Document, FileSource, HttpSource, HttpSourceConfig, MemorySource,
};
pub use store::{CachedDocument, ConfigStore, decode};
pub use types::{
    DEFAULT_FIRST_TIER_KM, DEFAULT_MINIMUM_INTERCITY_FARE, FareBundle, FareConfig,
    FareSurcharge, IntercityRailPricing, MotoConfig, RailConfig, TaxiTier, TukTukConfig,
    UrbanRailPricing, Validate,
};

#[cfg(test)]
pub(crate) use types::fixtures;
