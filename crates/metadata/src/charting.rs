//! Per-site charting scheme items.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::site::{SiteScoped, find_for_site};

/// A charting scheme document tagged with the site it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartingSchemeItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Charting scheme document, delivered to clients as-is.
    pub charting_scheme: serde_json::Value,
}

impl SiteScoped for ChartingSchemeItem {
    fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }
}

/// Select the charting scheme item for a site (site tag first, wildcard
/// fallback).
#[must_use]
pub fn find_charting_scheme_item<'a>(
    items: &'a [ChartingSchemeItem],
    site_id: &str,
) -> Option<&'a ChartingSchemeItem> {
    find_for_site(items, site_id)
}

/// Serialize a charting scheme item for the wire.
///
/// # Errors
///
/// Returns an error if the charting scheme document cannot be serialized.
pub fn charting_scheme_dto(item: &ChartingSchemeItem) -> Result<String> {
    Ok(serde_json::to_string(&item.charting_scheme)?)
}
