//! Async store seams owning each metadata category.
//!
//! Each category lives in an external service; the runtime only ever sees it
//! through these traits. A store is handed the manifest's setting descriptor
//! for its category and returns the full collection; the runtime replaces
//! its cache wholesale, never incrementally.

use async_trait::async_trait;
use sitebridge_settings::manifest::SettingDescriptor;

use crate::charting::ChartingSchemeItem;
use crate::config::ConnectorConfig;
use crate::error::Result;
use crate::schema::SchemaItem;
use crate::transform::TransformItem;
use crate::typemap::TypeMapItem;

/// Owns connector configs.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the config a setting points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service cannot produce the config.
    async fn connector_config(&self, setting: &SettingDescriptor) -> Result<ConnectorConfig>;
}

/// Owns per-site schema collections.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Fetch every schema item a setting points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service cannot produce the items.
    async fn schema_items(&self, setting: &SettingDescriptor) -> Result<Vec<SchemaItem>>;
}

/// Owns per-site charting scheme collections.
#[async_trait]
pub trait ChartingSchemeStore: Send + Sync {
    /// Fetch every charting scheme item a setting points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service cannot produce the items.
    async fn charting_scheme_items(
        &self,
        setting: &SettingDescriptor,
    ) -> Result<Vec<ChartingSchemeItem>>;
}

/// Owns per-site type map collections.
#[async_trait]
pub trait TypeMapStore: Send + Sync {
    /// Fetch every type map item a setting points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service cannot produce the items.
    async fn type_map_items(&self, setting: &SettingDescriptor) -> Result<Vec<TypeMapItem>>;
}

/// Owns connector transform collections.
#[async_trait]
pub trait TransformStore: Send + Sync {
    /// Fetch every transform a setting points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing service cannot produce the items.
    async fn transform_items(&self, setting: &SettingDescriptor) -> Result<Vec<TransformItem>>;
}
