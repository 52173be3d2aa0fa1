//! Load-once cache for configuration documents.
//!
//! Each document is fetched from its source at most once per successful
//! load. Concurrent first callers share a single in-flight fetch; a fetch
//! that fails is not cached, so the next caller tries again. A caller that
//! stops waiting (its future is dropped) does not poison the cache: another
//! waiter, or the next caller, drives the load to completion.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::{PoiCatalog, RailNetwork};

use super::error::ConfigError;
use super::source::{ConfigSource, Document};
use super::types::{FareBundle, Validate};

/// A single decoded document, initialised on first use.
pub struct CachedDocument<T> {
    document: Document,
    /// Single-entry cache; moka coalesces concurrent initialisations.
    cell: MokaCache<(), Arc<T>>,
}

impl<T> CachedDocument<T>
where
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    pub fn new(document: Document) -> Self {
        Self {
            document,
            cell: MokaCache::builder().build(),
        }
    }

    /// Return the cached document, loading it from `source` on first use.
    pub async fn get<S: ConfigSource>(&self, source: &S) -> Result<Arc<T>, ConfigError> {
        let document = self.document;
        self.cell
            .try_get_with((), async move {
                let bytes = source.fetch(document).await?;
                let value = decode::<T>(document, &bytes)?;
                info!(document = document.name(), bytes = bytes.len(), "loaded config document");
                Ok::<_, ConfigError>(Arc::new(value))
            })
            .await
            .map_err(|e: Arc<ConfigError>| {
                warn!(document = document.name(), error = %e, "config document unavailable");
                (*e).clone()
            })
    }

    /// Whether the document has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.contains_key(&())
    }
}

/// Decode and validate a document.
pub fn decode<T: DeserializeOwned + Validate>(
    document: Document,
    bytes: &[u8],
) -> Result<T, ConfigError> {
    let value: T = serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed {
        document: document.name().to_string(),
        message: e.to_string(),
    })?;

    value.validate().map_err(|message| ConfigError::Invalid {
        document: document.name().to_string(),
        message,
    })?;

    Ok(value)
}

/// Immutable pricing configuration, rail topology and POI catalog, each
/// loaded once from a [`ConfigSource`].
pub struct ConfigStore<S> {
    source: S,
    fares: CachedDocument<FareBundle>,
    network: CachedDocument<RailNetwork>,
    pois: CachedDocument<PoiCatalog>,
}

impl<S: ConfigSource> ConfigStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fares: CachedDocument::new(Document::Fares),
            network: CachedDocument::new(Document::RailNetwork),
            pois: CachedDocument::new(Document::Pois),
        }
    }

    /// Road and rail fare configuration.
    pub async fn fares(&self) -> Result<Arc<FareBundle>, ConfigError> {
        self.fares.get(&self.source).await
    }

    /// Rail stations and lines.
    pub async fn rail_network(&self) -> Result<Arc<RailNetwork>, ConfigError> {
        self.network.get(&self.source).await
    }

    /// Point-of-interest catalog.
    pub async fn pois(&self) -> Result<Arc<PoiCatalog>, ConfigError> {
        self.pois.get(&self.source).await
    }

    /// Load every document, failing on the first one that is unavailable.
    pub async fn preload(&self) -> Result<(), ConfigError> {
        self.fares().await?;
        self.rail_network().await?;
        self.pois().await?;
        Ok(())
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
