//! Error types for `sitebridge-metadata`.

use thiserror::Error;

/// Main error type for metadata stores and mapping.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The owning store failed to produce the requested items.
    #[error("store error: {0}")]
    Store(String),

    /// A service endpoint could not be rewritten for a site.
    #[error("invalid service url '{url}': {message}")]
    InvalidServiceUrl { url: String, message: String },

    /// JSON (de)serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
