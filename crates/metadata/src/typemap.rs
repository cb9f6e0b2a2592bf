//! Per-site type maps: logical type ids to site schema ids and imagery.

use serde::{Deserialize, Serialize};

use crate::site::{SiteScoped, find_for_site};

/// One logical-to-site type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapping {
    /// Type id as it appears in the connector config.
    pub logical_type_id: String,
    /// Type id in the site's schema.
    pub schema_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Mapping table that rewrites a connector config for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMap {
    #[serde(default)]
    pub mappings: Vec<TypeMapping>,
}

impl TypeMap {
    /// Look up the mapping for a logical type id.
    #[must_use]
    pub fn mapping_for(&self, logical_type_id: &str) -> Option<&TypeMapping> {
        self.mappings
            .iter()
            .find(|m| m.logical_type_id == logical_type_id)
    }
}

/// A cached type map tagged with the site it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    pub type_map: TypeMap,
}

impl SiteScoped for TypeMapItem {
    fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }
}

/// Select the type map item for a site (site tag first, wildcard fallback).
#[must_use]
pub fn find_type_map_item<'a>(items: &'a [TypeMapItem], site_id: &str) -> Option<&'a TypeMapItem> {
    find_for_site(items, site_id)
}
