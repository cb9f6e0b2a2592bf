//! Error types for the connector runtime.

use std::fmt;

use thiserror::Error;

/// The five metadata categories a runtime caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCategory {
    Config,
    Schema,
    ChartingSchemes,
    TypeMaps,
    Transforms,
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CacheCategory::Config => "config",
            CacheCategory::Schema => "schema",
            CacheCategory::ChartingSchemes => "charting schemes",
            CacheCategory::TypeMaps => "type maps",
            CacheCategory::Transforms => "transforms",
        };
        f.write_str(label)
    }
}

/// Main error type for connector runtime operations.
///
/// Every message embeds the connector id and, where applicable, the site id
/// or lookup key plus the root-cause message.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// The mandatory config was never loaded.
    #[error("connector '{connector_id}' does not have a config defined")]
    NotConfigured { connector_id: String },

    /// The category holds no item for the requested site and no wildcard.
    #[error("connector '{connector_id}' does not have {category} defined for site id '{site_id}'")]
    NotDefinedForSite {
        connector_id: String,
        category: CacheCategory,
        site_id: String,
    },

    /// No transform with the requested id is cached.
    #[error("connector '{connector_id}' does not have a transform defined with id '{transform_id}'")]
    TransformNotFound {
        connector_id: String,
        transform_id: String,
    },

    /// A manifest setting could not be resolved to its runtime value.
    #[error("problem retrieving setting '{setting_id}' for connector '{connector_id}': {message}")]
    SettingResolution {
        connector_id: String,
        setting_id: String,
        message: String,
    },

    /// The site-specific config could not be produced.
    #[error("problem returning config for connector '{connector_id}': {message}")]
    ConfigResolution {
        connector_id: String,
        message: String,
    },

    /// A cached item could not be serialized for the caller.
    #[error("problem returning {category} for connector '{connector_id}': {message}")]
    Resolution {
        connector_id: String,
        category: CacheCategory,
        message: String,
    },

    /// A cache load step failed.
    #[error("problem loading {category} for connector '{connector_id}': {message}")]
    CacheLoad {
        connector_id: String,
        category: CacheCategory,
        message: String,
    },

    /// The registry has no runtime for the connector.
    #[error("unknown connector '{connector_id}'")]
    UnknownConnector { connector_id: String },
}

/// Result type alias for connector runtime operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;
