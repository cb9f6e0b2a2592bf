//! Per-connector metadata cache and site resolver.

use std::sync::Arc;

use serde::Serialize;
use sitebridge_metadata::charting::{self, ChartingSchemeItem};
use sitebridge_metadata::config::{self, ConnectorConfig, ConnectorConfigDto};
use sitebridge_metadata::schema::{self, SchemaItem};
use sitebridge_metadata::site::ServiceQuery;
use sitebridge_metadata::stores::{
    ChartingSchemeStore, ConfigStore, SchemaStore, TransformStore, TypeMapStore,
};
use sitebridge_metadata::transform::{self, TransformItem};
use sitebridge_metadata::typemap::{self, TypeMap, TypeMapItem};
use sitebridge_settings::manifest::ConnectorManifest;
use sitebridge_settings::resolver::SettingsValueResolver;
use tracing::{debug, info};

use crate::env::ConnectorEnvironment;
use crate::error::{CacheCategory, ConnectorError, Result};

/// Acknowledgment returned by a successful cache reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadCacheResponse {
    pub message: String,
}

/// The collaborator stores a runtime loads each metadata category through.
#[derive(Clone)]
pub struct ConnectorStores {
    pub config: Arc<dyn ConfigStore>,
    pub schemas: Arc<dyn SchemaStore>,
    pub charting_schemes: Arc<dyn ChartingSchemeStore>,
    pub type_maps: Arc<dyn TypeMapStore>,
    pub transforms: Arc<dyn TransformStore>,
}

/// Live, per-connector cached metadata with site-specific resolution.
///
/// One instance exists per registered connector; the manifest is bound at
/// construction and referenced, never copied per request. Reads are
/// synchronous over the cached data. `initialize` and `reload_caches` take
/// `&mut self`, so a reload can never interleave with a read on the same
/// instance; cross-task callers go through the registry's per-runtime lock.
pub struct ConnectorRuntime {
    manifest: Arc<ConnectorManifest>,
    connector_id: String,
    stores: ConnectorStores,
    settings: Arc<dyn SettingsValueResolver>,
    env: ConnectorEnvironment,
    config: Option<ConnectorConfig>,
    schema_items: Vec<SchemaItem>,
    charting_scheme_items: Vec<ChartingSchemeItem>,
    type_map_items: Vec<TypeMapItem>,
    transform_items: Vec<TransformItem>,
}

impl std::fmt::Debug for ConnectorRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRuntime")
            .field("connector_id", &self.connector_id)
            .field("env", &self.env)
            .field("config", &self.config)
            .field("schema_items", &self.schema_items.len())
            .field("charting_scheme_items", &self.charting_scheme_items.len())
            .field("type_map_items", &self.type_map_items.len())
            .field("transform_items", &self.transform_items.len())
            .finish_non_exhaustive()
    }
}

impl ConnectorRuntime {
    /// Create a runtime with empty caches.
    ///
    /// Call [`initialize`](Self::initialize) before serving reads; until
    /// then every read reports the empty state.
    #[must_use]
    pub fn new(
        manifest: Arc<ConnectorManifest>,
        stores: ConnectorStores,
        settings: Arc<dyn SettingsValueResolver>,
        env: ConnectorEnvironment,
    ) -> Self {
        let connector_id = manifest.id.clone();
        Self {
            manifest,
            connector_id,
            stores,
            settings,
            env,
            config: None,
            schema_items: Vec::new(),
            charting_scheme_items: Vec::new(),
            type_map_items: Vec::new(),
            transform_items: Vec::new(),
        }
    }

    #[must_use]
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    #[must_use]
    pub fn connector_name(&self) -> &str {
        &self.manifest.name
    }

    /// Whether payload logging is enabled for this deployment.
    #[must_use]
    pub fn log_payloads(&self) -> bool {
        self.env.log_payloads()
    }

    /// Load every metadata category for the first time.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::CacheLoad`] from the failing category. The
    /// failing category is left cleared; the remaining steps are skipped.
    pub async fn initialize(&mut self) -> Result<()> {
        info!(
            connector_id = %self.connector_id,
            connector_name = %self.manifest.name,
            "initializing connector runtime"
        );
        self.load_caches().await
    }

    /// The connector config, rewritten for the requesting site.
    ///
    /// When the connector caches no type maps at all the config is served
    /// unmapped.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::NotConfigured`] if no config is cached and
    /// [`ConnectorError::ConfigResolution`] if the site's type map cannot be
    /// applied.
    pub fn config_as_dto(&self, query: &ServiceQuery) -> Result<ConnectorConfigDto> {
        let site_id = query.effective_site_id();
        let Some(cached) = self.config.as_ref() else {
            return Err(ConnectorError::NotConfigured {
                connector_id: self.connector_id.clone(),
            });
        };

        let site_config = match self.type_map(site_id) {
            Ok(type_map) => config::mapped_config(cached, type_map, query)
                .map_err(|e| self.config_resolution(e.to_string()))?,
            Err(ConnectorError::NotDefinedForSite { .. }) => cached.clone(),
            Err(e) => return Err(self.config_resolution(e.to_string())),
        };

        let dto = config::config_as_dto(&site_config);
        self.log_payload(CacheCategory::Config, &dto);
        Ok(dto)
    }

    /// The schema document for the requesting site, serialized.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::NotDefinedForSite`] when neither a
    /// site-specific nor a wildcard schema is cached.
    pub fn schema_as_dto(&self, query: &ServiceQuery) -> Result<String> {
        let site_id = query.effective_site_id();
        let item = schema::find_schema_item(&self.schema_items, site_id)
            .ok_or_else(|| self.not_defined_for_site(CacheCategory::Schema, site_id))?;
        let dto = schema::schema_dto(item)
            .map_err(|e| self.resolution(CacheCategory::Schema, e.to_string()))?;
        self.log_payload(CacheCategory::Schema, &dto);
        Ok(dto)
    }

    /// The charting scheme document for the requesting site, serialized.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::NotDefinedForSite`] when neither a
    /// site-specific nor a wildcard charting scheme is cached.
    pub fn charting_schemes_as_dto(&self, query: &ServiceQuery) -> Result<String> {
        let site_id = query.effective_site_id();
        let item = charting::find_charting_scheme_item(&self.charting_scheme_items, site_id)
            .ok_or_else(|| self.not_defined_for_site(CacheCategory::ChartingSchemes, site_id))?;
        let dto = charting::charting_scheme_dto(item)
            .map_err(|e| self.resolution(CacheCategory::ChartingSchemes, e.to_string()))?;
        self.log_payload(CacheCategory::ChartingSchemes, &dto);
        Ok(dto)
    }

    /// The type map for a site (site tag first, wildcard fallback).
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::NotDefinedForSite`] when nothing matches.
    pub fn type_map(&self, site_id: &str) -> Result<&TypeMap> {
        typemap::find_type_map_item(&self.type_map_items, site_id)
            .map(|item| &item.type_map)
            .ok_or_else(|| self.not_defined_for_site(CacheCategory::TypeMaps, site_id))
    }

    /// The transform with the given id. Transforms are not site-scoped.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::TransformNotFound`] when no transform with
    /// the id is cached, even if other transforms are.
    pub fn transform(&self, id: &str) -> Result<&str> {
        transform::find_transform_item(&self.transform_items, id)
            .map(|item| item.transform.as_str())
            .ok_or_else(|| ConnectorError::TransformNotFound {
                connector_id: self.connector_id.clone(),
                transform_id: id.to_string(),
            })
    }

    /// Resolve a named manifest setting to its runtime value.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::SettingResolution`] wrapping both
    /// missing-setting and resolver failures.
    pub async fn setting_value(&self, id: &str) -> Result<serde_json::Value> {
        let resolved = async {
            let setting = self.manifest.required_setting(id)?;
            self.settings.settings_value(setting).await
        }
        .await;

        match resolved {
            Ok(value) => Ok(value.value),
            Err(e) => Err(ConnectorError::SettingResolution {
                connector_id: self.connector_id.clone(),
                setting_id: id.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Re-run the full load sequence, replacing every cached category.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::CacheLoad`] from the failing category.
    pub async fn reload_caches(&mut self) -> Result<ReloadCacheResponse> {
        self.load_caches().await?;
        Ok(ReloadCacheResponse {
            message: "Connector caches reloaded successfully.".to_string(),
        })
    }

    // The five load steps run sequentially; each clears its category before
    // fetching, so a failed fetch leaves that category empty rather than
    // stale.
    async fn load_caches(&mut self) -> Result<()> {
        self.load_config().await?;
        self.load_schema_items().await?;
        self.load_charting_scheme_items().await?;
        self.load_type_map_items().await?;
        self.load_transform_items().await?;
        Ok(())
    }

    async fn load_config(&mut self) -> Result<()> {
        self.config = None;
        let manifest = Arc::clone(&self.manifest);
        let setting = manifest
            .config_setting()
            .map_err(|e| self.cache_load(CacheCategory::Config, e.to_string()))?;
        let loaded = self
            .stores
            .config
            .connector_config(setting)
            .await
            .map_err(|e| self.cache_load(CacheCategory::Config, e.to_string()))?;
        debug!(connector_id = %self.connector_id, "connector config cached");
        self.config = Some(loaded);
        Ok(())
    }

    async fn load_schema_items(&mut self) -> Result<()> {
        self.schema_items.clear();
        let manifest = Arc::clone(&self.manifest);
        let Some(setting) = manifest.schemas_setting() else {
            return Ok(());
        };
        let items = self
            .stores
            .schemas
            .schema_items(setting)
            .await
            .map_err(|e| self.cache_load(CacheCategory::Schema, e.to_string()))?;
        debug!(connector_id = %self.connector_id, count = items.len(), "schema items cached");
        self.schema_items = items;
        Ok(())
    }

    async fn load_charting_scheme_items(&mut self) -> Result<()> {
        self.charting_scheme_items.clear();
        let manifest = Arc::clone(&self.manifest);
        let Some(setting) = manifest.charting_schemes_setting() else {
            return Ok(());
        };
        let items = self
            .stores
            .charting_schemes
            .charting_scheme_items(setting)
            .await
            .map_err(|e| self.cache_load(CacheCategory::ChartingSchemes, e.to_string()))?;
        debug!(
            connector_id = %self.connector_id,
            count = items.len(),
            "charting scheme items cached"
        );
        self.charting_scheme_items = items;
        Ok(())
    }

    async fn load_type_map_items(&mut self) -> Result<()> {
        self.type_map_items.clear();
        let manifest = Arc::clone(&self.manifest);
        let Some(setting) = manifest.type_maps_setting() else {
            return Ok(());
        };
        let items = self
            .stores
            .type_maps
            .type_map_items(setting)
            .await
            .map_err(|e| self.cache_load(CacheCategory::TypeMaps, e.to_string()))?;
        debug!(connector_id = %self.connector_id, count = items.len(), "type map items cached");
        self.type_map_items = items;
        Ok(())
    }

    async fn load_transform_items(&mut self) -> Result<()> {
        self.transform_items.clear();
        let manifest = Arc::clone(&self.manifest);
        let Some(setting) = manifest.transforms_setting() else {
            return Ok(());
        };
        let items = self
            .stores
            .transforms
            .transform_items(setting)
            .await
            .map_err(|e| self.cache_load(CacheCategory::Transforms, e.to_string()))?;
        debug!(connector_id = %self.connector_id, count = items.len(), "transform items cached");
        self.transform_items = items;
        Ok(())
    }

    fn log_payload<T: Serialize>(&self, category: CacheCategory, payload: &T) {
        if !self.env.log_payloads() {
            return;
        }
        if let Ok(json) = serde_json::to_string(payload) {
            debug!(
                connector_id = %self.connector_id,
                category = %category,
                payload = %json,
                "returning payload"
            );
        }
    }

    fn not_defined_for_site(&self, category: CacheCategory, site_id: &str) -> ConnectorError {
        ConnectorError::NotDefinedForSite {
            connector_id: self.connector_id.clone(),
            category,
            site_id: site_id.to_string(),
        }
    }

    fn config_resolution(&self, message: String) -> ConnectorError {
        ConnectorError::ConfigResolution {
            connector_id: self.connector_id.clone(),
            message,
        }
    }

    fn resolution(&self, category: CacheCategory, message: String) -> ConnectorError {
        ConnectorError::Resolution {
            connector_id: self.connector_id.clone(),
            category,
            message,
        }
    }

    fn cache_load(&self, category: CacheCategory, message: String) -> ConnectorError {
        ConnectorError::CacheLoad {
            connector_id: self.connector_id.clone(),
            category,
            message,
        }
    }
}
