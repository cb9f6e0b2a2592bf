//! In-memory fakes for exercising the connector runtime in tests.
//!
//! [`InMemoryStores`] backs every store seam plus the settings resolver from
//! one shared map keyed by setting location, with per-category failure
//! injection. [`ManifestBuilder`] produces manifests wired to the well-known
//! category setting ids.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sitebridge_metadata::charting::ChartingSchemeItem;
use sitebridge_metadata::config::ConnectorConfig;
use sitebridge_metadata::error::MetadataError;
use sitebridge_metadata::schema::SchemaItem;
use sitebridge_metadata::stores::{
    ChartingSchemeStore, ConfigStore, SchemaStore, TransformStore, TypeMapStore,
};
use sitebridge_metadata::transform::TransformItem;
use sitebridge_metadata::typemap::{TypeMap, TypeMapItem};
use sitebridge_settings::error::SettingsError;
use sitebridge_settings::manifest::{
    CHARTING_SCHEMES_SETTING_ID, CONFIG_SETTING_ID, ConnectorManifest, SCHEMAS_SETTING_ID,
    SettingDescriptor, TRANSFORMS_SETTING_ID, TYPE_MAPS_SETTING_ID,
};
use sitebridge_settings::resolver::{SettingsValue, SettingsValueResolver};

const CONFIG: &str = "config";
const SCHEMAS: &str = "schemas";
const CHARTING_SCHEMES: &str = "charting-schemes";
const TYPE_MAPS: &str = "type-maps";
const TRANSFORMS: &str = "transforms";
const VALUES: &str = "values";

#[derive(Default)]
struct StoreData {
    configs: HashMap<String, ConnectorConfig>,
    schemas: HashMap<String, Vec<SchemaItem>>,
    charting_schemes: HashMap<String, Vec<ChartingSchemeItem>>,
    type_maps: HashMap<String, Vec<TypeMapItem>>,
    transforms: HashMap<String, Vec<TransformItem>>,
    values: HashMap<String, serde_json::Value>,
    failures: HashMap<&'static str, String>,
}

/// Shared in-memory backing for every store seam plus the settings resolver.
///
/// Clones share the same data, so one handle can seed or mutate while
/// another serves a runtime under test.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    data: Arc<RwLock<StoreData>>,
}

impl InMemoryStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_config(&self, location: &str, config: ConnectorConfig) {
        self.data.write().configs.insert(location.to_string(), config);
    }

    pub fn put_schemas(&self, location: &str, items: Vec<SchemaItem>) {
        self.data.write().schemas.insert(location.to_string(), items);
    }

    pub fn put_charting_schemes(&self, location: &str, items: Vec<ChartingSchemeItem>) {
        self.data
            .write()
            .charting_schemes
            .insert(location.to_string(), items);
    }

    pub fn put_type_maps(&self, location: &str, items: Vec<TypeMapItem>) {
        self.data.write().type_maps.insert(location.to_string(), items);
    }

    pub fn put_transforms(&self, location: &str, items: Vec<TransformItem>) {
        self.data
            .write()
            .transforms
            .insert(location.to_string(), items);
    }

    pub fn put_value(&self, location: &str, value: serde_json::Value) {
        self.data.write().values.insert(location.to_string(), value);
    }

    /// Make every config fetch fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_config(&self, message: &str) {
        self.fail(CONFIG, message);
    }

    /// Make every schema fetch fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_schemas(&self, message: &str) {
        self.fail(SCHEMAS, message);
    }

    /// Make every charting scheme fetch fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_charting_schemes(&self, message: &str) {
        self.fail(CHARTING_SCHEMES, message);
    }

    /// Make every type map fetch fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_type_maps(&self, message: &str) {
        self.fail(TYPE_MAPS, message);
    }

    /// Make every transform fetch fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_transforms(&self, message: &str) {
        self.fail(TRANSFORMS, message);
    }

    /// Make every settings-value resolution fail until
    /// [`clear_failures`](Self::clear_failures).
    pub fn fail_values(&self, message: &str) {
        self.fail(VALUES, message);
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        self.data.write().failures.clear();
    }

    fn fail(&self, category: &'static str, message: &str) {
        self.data
            .write()
            .failures
            .insert(category, message.to_string());
    }

    fn failure(&self, category: &'static str) -> Option<String> {
        self.data.read().failures.get(category).cloned()
    }
}

#[async_trait]
impl ConfigStore for InMemoryStores {
    async fn connector_config(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_metadata::error::Result<ConnectorConfig> {
        if let Some(message) = self.failure(CONFIG) {
            return Err(MetadataError::Store(message));
        }
        self.data
            .read()
            .configs
            .get(&setting.location)
            .cloned()
            .ok_or_else(|| MetadataError::Store(format!("no config at '{}'", setting.location)))
    }
}

#[async_trait]
impl SchemaStore for InMemoryStores {
    async fn schema_items(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_metadata::error::Result<Vec<SchemaItem>> {
        if let Some(message) = self.failure(SCHEMAS) {
            return Err(MetadataError::Store(message));
        }
        Ok(self
            .data
            .read()
            .schemas
            .get(&setting.location)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl ChartingSchemeStore for InMemoryStores {
    async fn charting_scheme_items(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_metadata::error::Result<Vec<ChartingSchemeItem>> {
        if let Some(message) = self.failure(CHARTING_SCHEMES) {
            return Err(MetadataError::Store(message));
        }
        Ok(self
            .data
            .read()
            .charting_schemes
            .get(&setting.location)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TypeMapStore for InMemoryStores {
    async fn type_map_items(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_metadata::error::Result<Vec<TypeMapItem>> {
        if let Some(message) = self.failure(TYPE_MAPS) {
            return Err(MetadataError::Store(message));
        }
        Ok(self
            .data
            .read()
            .type_maps
            .get(&setting.location)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TransformStore for InMemoryStores {
    async fn transform_items(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_metadata::error::Result<Vec<TransformItem>> {
        if let Some(message) = self.failure(TRANSFORMS) {
            return Err(MetadataError::Store(message));
        }
        Ok(self
            .data
            .read()
            .transforms
            .get(&setting.location)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SettingsValueResolver for InMemoryStores {
    async fn settings_value(
        &self,
        setting: &SettingDescriptor,
    ) -> sitebridge_settings::error::Result<SettingsValue> {
        if let Some(message) = self.failure(VALUES) {
            return Err(SettingsError::Resolve {
                setting_id: setting.id.clone(),
                message,
            });
        }
        self.data
            .read()
            .values
            .get(&setting.location)
            .cloned()
            .map(|value| SettingsValue { value })
            .ok_or_else(|| SettingsError::Resolve {
                setting_id: setting.id.clone(),
                message: format!("no value at '{}'", setting.location),
            })
    }
}

/// Builder for test manifests wired to the well-known category settings.
pub struct ManifestBuilder {
    manifest: ConnectorManifest,
}

impl ManifestBuilder {
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            manifest: ConnectorManifest {
                id: id.to_string(),
                name: name.to_string(),
                settings: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn with_setting(mut self, id: &str, location: &str) -> Self {
        self.manifest.settings.push(SettingDescriptor {
            id: id.to_string(),
            location: location.to_string(),
            description: None,
        });
        self
    }

    #[must_use]
    pub fn with_config(self, location: &str) -> Self {
        self.with_setting(CONFIG_SETTING_ID, location)
    }

    #[must_use]
    pub fn with_schemas(self, location: &str) -> Self {
        self.with_setting(SCHEMAS_SETTING_ID, location)
    }

    #[must_use]
    pub fn with_charting_schemes(self, location: &str) -> Self {
        self.with_setting(CHARTING_SCHEMES_SETTING_ID, location)
    }

    #[must_use]
    pub fn with_type_maps(self, location: &str) -> Self {
        self.with_setting(TYPE_MAPS_SETTING_ID, location)
    }

    #[must_use]
    pub fn with_transforms(self, location: &str) -> Self {
        self.with_setting(TRANSFORMS_SETTING_ID, location)
    }

    #[must_use]
    pub fn build(self) -> ConnectorManifest {
        self.manifest
    }
}

/// Schema item fixture.
#[must_use]
pub fn schema_item(site_id: Option<&str>, document: serde_json::Value) -> SchemaItem {
    SchemaItem {
        site_id: site_id.map(str::to_string),
        schema: document,
    }
}

/// Charting scheme item fixture.
#[must_use]
pub fn charting_scheme_item(
    site_id: Option<&str>,
    document: serde_json::Value,
) -> ChartingSchemeItem {
    ChartingSchemeItem {
        site_id: site_id.map(str::to_string),
        charting_scheme: document,
    }
}

/// Type map item fixture.
#[must_use]
pub fn type_map_item(site_id: Option<&str>, type_map: TypeMap) -> TypeMapItem {
    TypeMapItem {
        site_id: site_id.map(str::to_string),
        type_map,
    }
}

/// Transform item fixture.
#[must_use]
pub fn transform_item(id: &str, transform: &str) -> TransformItem {
    TransformItem {
        id: id.to_string(),
        transform: transform.to_string(),
    }
}
