//! One runtime per connector, owned behind shared read/write handles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sitebridge_settings::manifest::ConnectorManifest;
use sitebridge_settings::resolver::SettingsValueResolver;
use tracing::info;

use crate::env::ConnectorEnvironment;
use crate::error::{ConnectorError, Result};
use crate::runtime::{ConnectorRuntime, ConnectorStores, ReloadCacheResponse};

/// Shared handle to one connector's runtime.
///
/// Reads take the read lock; reloads take the write lock. The write lock is
/// what keeps reloads single-flight per connector and keeps readers from
/// observing a partially-cleared cache.
pub type RuntimeHandle = Arc<tokio::sync::RwLock<ConnectorRuntime>>;

/// Owns exactly one [`ConnectorRuntime`] per registered connector.
pub struct ConnectorRegistry {
    stores: ConnectorStores,
    settings: Arc<dyn SettingsValueResolver>,
    env: ConnectorEnvironment,
    runtimes: RwLock<HashMap<String, RuntimeHandle>>,
}

impl ConnectorRegistry {
    #[must_use]
    pub fn new(
        stores: ConnectorStores,
        settings: Arc<dyn SettingsValueResolver>,
        env: ConnectorEnvironment,
    ) -> Self {
        Self {
            stores,
            settings,
            env,
            runtimes: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connector: construct a fresh runtime, initialize it, and
    /// replace any previous registration under the same id.
    ///
    /// # Errors
    ///
    /// Returns the initialization error. A failed registration leaves any
    /// existing runtime for the id in place.
    pub async fn register(&self, manifest: ConnectorManifest) -> Result<RuntimeHandle> {
        let connector_id = manifest.id.clone();
        let mut runtime = ConnectorRuntime::new(
            Arc::new(manifest),
            self.stores.clone(),
            Arc::clone(&self.settings),
            self.env,
        );
        runtime.initialize().await?;

        let handle: RuntimeHandle = Arc::new(tokio::sync::RwLock::new(runtime));
        let replaced = self
            .runtimes
            .write()
            .insert(connector_id.clone(), Arc::clone(&handle))
            .is_some();
        info!(connector_id = %connector_id, replaced, "connector registered");
        Ok(handle)
    }

    /// The runtime handle for a connector.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownConnector`] if the connector is not
    /// registered.
    pub fn runtime(&self, connector_id: &str) -> Result<RuntimeHandle> {
        self.runtimes
            .read()
            .get(connector_id)
            .cloned()
            .ok_or_else(|| ConnectorError::UnknownConnector {
                connector_id: connector_id.to_string(),
            })
    }

    /// Registered connector ids.
    #[must_use]
    pub fn connector_ids(&self) -> Vec<String> {
        self.runtimes.read().keys().cloned().collect()
    }

    /// Reload a connector's caches under its write lock.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownConnector`] for unregistered ids,
    /// otherwise any [`ConnectorError::CacheLoad`] from the reload itself.
    pub async fn reload(&self, connector_id: &str) -> Result<ReloadCacheResponse> {
        let handle = self.runtime(connector_id)?;
        let mut runtime = handle.write().await;
        runtime.reload_caches().await
    }

    /// Drop a connector's registration. Returns whether it existed.
    pub fn remove(&self, connector_id: &str) -> bool {
        let removed = self.runtimes.write().remove(connector_id).is_some();
        if removed {
            info!(connector_id = %connector_id, "connector deregistered");
        }
        removed
    }
}
