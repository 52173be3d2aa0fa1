//! Configuration loading errors.

/// A configuration document could not be obtained.
///
/// Every variant means the configuration is unavailable: callers that need
/// it to price a trip must surface the error rather than fall back to
/// zero-cost pricing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The source has no such document
    #[error("config document {document} not found")]
    NotFound { document: String },

    /// Reading from the source failed
    #[error("failed to read config document {document}: {message}")]
    Io { document: String, message: String },

    /// The source answered with a non-success HTTP status
    #[error("config source returned HTTP {status} for {document}")]
    Http { document: String, status: u16 },

    /// The bytes are not a valid document of the expected shape
    #[error("config document {document} is malformed: {message}")]
    Malformed { document: String, message: String },

    /// The document decoded but breaks a pricing invariant
    #[error("config document {document} is invalid: {message}")]
    Invalid { document: String, message: String },
}

impl ConfigError {
    /// Name of the document this error refers to.
    pub fn document(&self) -> &str {
        match self {
            ConfigError::NotFound { document }
            | ConfigError::Io { document, .. }
            | ConfigError::Http { document, .. }
            | ConfigError::Malformed { document, .. }
            | ConfigError::Invalid { document, .. } => document,
        }
    }
}
