//! Async seam for resolving a setting's runtime value.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::manifest::SettingDescriptor;

/// A resolved settings value, as returned by the settings backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsValue {
    pub value: serde_json::Value,
}

/// Resolves setting descriptors to their runtime values.
///
/// Implementations talk to the deployment's settings backend. Timeouts and
/// retries are the backend's responsibility, not the caller's.
#[async_trait]
pub trait SettingsValueResolver: Send + Sync {
    /// Fetch the current value for a setting.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Resolve`](crate::error::SettingsError::Resolve)
    /// if the backend cannot produce a value for the descriptor.
    async fn settings_value(&self, setting: &SettingDescriptor) -> Result<SettingsValue>;
}
