//! Per-site schema items.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::site::{SiteScoped, find_for_site};

/// A schema document tagged with the site it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Schema document, delivered to clients as-is.
    pub schema: serde_json::Value,
}

impl SiteScoped for SchemaItem {
    fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }
}

/// Select the schema item for a site (site tag first, wildcard fallback).
#[must_use]
pub fn find_schema_item<'a>(items: &'a [SchemaItem], site_id: &str) -> Option<&'a SchemaItem> {
    find_for_site(items, site_id)
}

/// Serialize a schema item for the wire.
///
/// # Errors
///
/// Returns an error if the schema document cannot be serialized.
pub fn schema_dto(item: &SchemaItem) -> Result<String> {
    Ok(serde_json::to_string(&item.schema)?)
}
