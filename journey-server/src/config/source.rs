//! Byte sources for configuration documents.
//!
//! The core only needs raw bytes for a named document; where they come from
//! (a data directory, an HTTP endpoint, an embedded blob) is up to the
//! source. Sources do not retry: a failed fetch surfaces as a
//! [`ConfigError`] and the next caller tries again.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use super::error::ConfigError;

/// The documents the core knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Road and rail fare configuration
    Fares,
    /// Rail stations and lines
    RailNetwork,
    /// Point-of-interest catalog
    Pois,
}

impl Document {
    /// Base file name of the document, without extension.
    pub fn name(&self) -> &'static str {
        match self {
            Document::Fares => "fares_config",
            Document::RailNetwork => "rail_network",
            Document::Pois => "pois",
        }
    }

    /// File name of the document as stored by the data pipeline.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

/// Something that can produce the raw bytes of a configuration document.
pub trait ConfigSource: Send + Sync + 'static {
    /// Fetch the bytes of `document`.
    fn fetch(
        &self,
        document: Document,
    ) -> impl Future<Output = Result<Vec<u8>, ConfigError>> + Send;
}

/// Reads documents from `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ConfigSource for FileSource {
    async fn fetch(&self, document: Document) -> Result<Vec<u8>, ConfigError> {
        let path = self.dir.join(document.file_name());
        debug!(path = %path.display(), "reading config document");

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    document: document.name().to_string(),
                }
            } else {
                ConfigError::Io {
                    document: document.name().to_string(),
                    message: format!("{}: {e}", path.display()),
                }
            }
        })
    }
}

/// Configuration for the HTTP document source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL; documents are fetched from `<base_url>/<name>.json`
    pub base_url: String,
    /// Optional API key sent in the `x-apikey` header
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate requests with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Fetches documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a new HTTP source.
    pub fn new(config: HttpSourceConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| ConfigError::Io {
                document: String::new(),
                message: "invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Io {
                document: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL a document is fetched from.
    pub fn url_for(&self, document: Document) -> String {
        format!("{}/{}", self.base_url, document.file_name())
    }
}

impl ConfigSource for HttpSource {
    async fn fetch(&self, document: Document) -> Result<Vec<u8>, ConfigError> {
        let url = self.url_for(document);
        debug!(%url, "fetching config document");

        let io_error = |e: reqwest::Error| ConfigError::Io {
            document: document.name().to_string(),
            message: e.to_string(),
        };

        let response = self.http.get(&url).send().await.map_err(io_error)?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ConfigError::NotFound {
                document: document.name().to_string(),
            });
        }

        if !status.is_success() {
            return Err(ConfigError::Http {
                document: document.name().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(io_error)?;
        Ok(body.to_vec())
    }
}

/// Serves documents from memory. Useful for embedded data and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<Document, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with(mut self, document: Document, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(document, bytes.into());
        self
    }
}

impl ConfigSource for MemorySource {
    async fn fetch(&self, document: Document) -> Result<Vec<u8>, ConfigError> {
        self.documents
            .get(&document)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                document: document.name().to_string(),
            })
    }
}

/// The source chosen at startup: a data directory or an HTTP endpoint.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(FileSource),
    Http(HttpSource),
}

impl ConfigSource for DataSource {
    async fn fetch(&self, document: Document) -> Result<Vec<u8>, ConfigError> {
        match self {
            DataSource::File(source) => source.fetch(document).await,
            DataSource::Http(source) => source.fetch(document).await,
        }
    }
}
