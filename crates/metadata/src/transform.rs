//! Connector transforms, keyed by transform id.

use serde::{Deserialize, Serialize};

/// A data-shaping transform shipped with a connector.
///
/// Transforms are keyed by id, not site-scoped: the same transform text
/// serves every site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformItem {
    pub id: String,
    /// Transform source text, applied by the reporting client.
    pub transform: String,
}

/// Look up a transform by id.
#[must_use]
pub fn find_transform_item<'a>(items: &'a [TransformItem], id: &str) -> Option<&'a TransformItem> {
    items.iter().find(|t| t.id == id)
}
