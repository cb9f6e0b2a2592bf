//! Connector manifest wire types and category setting lookup.
//!
//! A manifest declares one setting per metadata category it ships. Category
//! settings are found by well-known ids; the config setting is the only one
//! every connector must declare.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Well-known setting id backing a connector's config. Mandatory.
pub const CONFIG_SETTING_ID: &str = "connector.config";
/// Well-known setting id backing per-site schemas.
pub const SCHEMAS_SETTING_ID: &str = "connector.schemas";
/// Well-known setting id backing per-site charting schemes.
pub const CHARTING_SCHEMES_SETTING_ID: &str = "connector.charting-schemes";
/// Well-known setting id backing per-site type maps.
pub const TYPE_MAPS_SETTING_ID: &str = "connector.type-maps";
/// Well-known setting id backing the connector's transforms.
pub const TRANSFORMS_SETTING_ID: &str = "connector.transforms";

/// Reference to a named value in the external settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDescriptor {
    /// Setting id, unique within one manifest.
    pub id: String,
    /// Storage key the owning store resolves this setting against.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Static descriptor of a connector. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorManifest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub settings: Vec<SettingDescriptor>,
}

impl ConnectorManifest {
    /// Look up a declared setting by id.
    #[must_use]
    pub fn setting(&self, id: &str) -> Option<&SettingDescriptor> {
        self.settings.iter().find(|s| s.id == id)
    }

    /// Look up a setting the caller cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingSetting`] if the manifest does not
    /// declare the setting.
    pub fn required_setting(&self, id: &str) -> Result<&SettingDescriptor> {
        self.setting(id).ok_or_else(|| SettingsError::MissingSetting {
            manifest_id: self.id.clone(),
            setting_id: id.to_string(),
        })
    }

    /// The setting backing the connector config.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingSetting`]; a config setting is
    /// mandatory for every connector.
    pub fn config_setting(&self) -> Result<&SettingDescriptor> {
        self.required_setting(CONFIG_SETTING_ID)
    }

    /// The setting backing per-site schemas, if declared.
    #[must_use]
    pub fn schemas_setting(&self) -> Option<&SettingDescriptor> {
        self.setting(SCHEMAS_SETTING_ID)
    }

    /// The setting backing per-site charting schemes, if declared.
    #[must_use]
    pub fn charting_schemes_setting(&self) -> Option<&SettingDescriptor> {
        self.setting(CHARTING_SCHEMES_SETTING_ID)
    }

    /// The setting backing per-site type maps, if declared.
    #[must_use]
    pub fn type_maps_setting(&self) -> Option<&SettingDescriptor> {
        self.setting(TYPE_MAPS_SETTING_ID)
    }

    /// The setting backing the connector's transforms, if declared.
    #[must_use]
    pub fn transforms_setting(&self) -> Option<&SettingDescriptor> {
        self.setting(TRANSFORMS_SETTING_ID)
    }
}
