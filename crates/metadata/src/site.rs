//! Site scoping: the default-site marker, request queries, and the
//! resolution policy shared by every site-tagged category.

use serde::{Deserialize, Serialize};

/// Site id assumed when a request does not name one.
pub const DEFAULT_SITE_ID: &str = "default";

/// Query parameters accepted by every metadata read operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceQuery {
    /// Requesting site, if any.
    #[serde(default, rename = "siteid", skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
}

impl ServiceQuery {
    /// Query for an explicit site.
    #[must_use]
    pub fn for_site(site_id: impl Into<String>) -> Self {
        Self {
            site_id: Some(site_id.into()),
        }
    }

    /// The site this request is effectively for.
    #[must_use]
    pub fn effective_site_id(&self) -> &str {
        self.site_id.as_deref().unwrap_or(DEFAULT_SITE_ID)
    }
}

/// A cached item tagged with the site it applies to.
pub trait SiteScoped {
    /// Site tag, or `None` for the default/wildcard marker.
    fn site_id(&self) -> Option<&str>;
}

/// Select the item for a site.
///
/// An item tagged with the requested site wins; otherwise the first
/// untagged (wildcard) item is the fallback. First match wins in item
/// order. Returns `None` when neither exists.
pub fn find_for_site<'a, T: SiteScoped>(items: &'a [T], site_id: &str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| item.site_id() == Some(site_id))
        .or_else(|| items.iter().find(|item| item.site_id().is_none()))
}
