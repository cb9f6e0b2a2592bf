//! Connector config: wire types, site-specific rewriting, DTO conversion.
//!
//! The stored config is site-agnostic. At read time it is rewritten through
//! the requesting site's type map: logical type ids become the site's schema
//! type ids, mapped image urls replace the defaults, and service endpoints
//! are tagged with the requesting site so downstream calls stay site-scoped.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MetadataError, Result};
use crate::site::{DEFAULT_SITE_ID, ServiceQuery};
use crate::typemap::TypeMap;

/// A connector's configuration, as stored. One per connector; site-specific
/// variants are derived at read time via [`mapped_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_values: Option<DefaultValues>,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

/// Connector-wide default type ids and imagery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One service exposed by a connector (a search, an expand, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Endpoint the reporting client calls for this service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Logical type ids of the items this service returns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result_item_type_ids: Vec<String>,
}

/// Wire representation of a (site-mapped) connector config.
///
/// Kept separate from [`ConnectorConfig`] so the client-facing shape can
/// evolve independently of the stored shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorConfigDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_values: Option<DefaultValues>,
    pub services: Vec<ServiceEntry>,
}

/// Derive the site-specific variant of a config.
///
/// Logical type ids with a mapping are rewritten to the site's schema type
/// ids; ids without one pass through unchanged. A mapped image url replaces
/// the default entity imagery. Service endpoints are tagged with the
/// requesting site unless the request is for the default site.
///
/// # Errors
///
/// Returns an error if a service url cannot be parsed for rewriting.
pub fn mapped_config(
    config: &ConnectorConfig,
    type_map: &TypeMap,
    query: &ServiceQuery,
) -> Result<ConnectorConfig> {
    let mut mapped = config.clone();

    if let Some(defaults) = mapped.default_values.as_mut() {
        if let Some(id) = defaults.entity_type_id.as_deref() {
            if let Some(m) = type_map.mapping_for(id) {
                let schema_type_id = m.schema_type_id.clone();
                if let Some(image) = &m.image_url {
                    defaults.image_url = Some(image.clone());
                }
                defaults.entity_type_id = Some(schema_type_id);
            }
        }
        if let Some(id) = defaults.link_type_id.as_deref() {
            if let Some(m) = type_map.mapping_for(id) {
                defaults.link_type_id = Some(m.schema_type_id.clone());
            }
        }
    }

    for service in &mut mapped.services {
        for type_id in &mut service.result_item_type_ids {
            if let Some(m) = type_map.mapping_for(type_id) {
                *type_id = m.schema_type_id.clone();
            }
        }
        if let Some(url) = service.url.take() {
            service.url = Some(site_scoped_url(&url, query)?);
        }
    }

    Ok(mapped)
}

/// Convert a config into its wire representation.
#[must_use]
pub fn config_as_dto(config: &ConnectorConfig) -> ConnectorConfigDto {
    ConnectorConfigDto {
        default_values: config.default_values.clone(),
        services: config.services.clone(),
    }
}

/// Tag a service endpoint with the requesting site.
///
/// Default-site requests keep the endpoint untouched.
fn site_scoped_url(url: &str, query: &ServiceQuery) -> Result<String> {
    let site_id = query.effective_site_id();
    if site_id == DEFAULT_SITE_ID {
        return Ok(url.to_string());
    }

    let mut parsed = Url::parse(url).map_err(|e| MetadataError::InvalidServiceUrl {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    parsed.query_pairs_mut().append_pair("siteid", site_id);
    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typemap::TypeMapping;

    fn config() -> ConnectorConfig {
        ConnectorConfig {
            default_values: Some(DefaultValues {
                entity_type_id: Some("ET1".to_string()),
                link_type_id: Some("LT1".to_string()),
                image_url: Some("https://cdn.example.com/generic.svg".to_string()),
            }),
            services: vec![ServiceEntry {
                id: "find-things".to_string(),
                name: "Find things".to_string(),
                description: None,
                url: Some("https://connector.example.com/find".to_string()),
                result_item_type_ids: vec!["ET1".to_string(), "ET2".to_string()],
            }],
        }
    }

    fn type_map() -> TypeMap {
        TypeMap {
            mappings: vec![
                TypeMapping {
                    logical_type_id: "ET1".to_string(),
                    schema_type_id: "site.person".to_string(),
                    image_url: Some("https://cdn.example.com/person.svg".to_string()),
                },
                TypeMapping {
                    logical_type_id: "LT1".to_string(),
                    schema_type_id: "site.owns".to_string(),
                    image_url: None,
                },
            ],
        }
    }

    #[test]
    fn rewrites_ids_and_imagery() {
        let query = ServiceQuery::for_site("site-a");
        let mapped = mapped_config(&config(), &type_map(), &query).unwrap();

        let defaults = mapped.default_values.unwrap();
        assert_eq!(defaults.entity_type_id.as_deref(), Some("site.person"));
        assert_eq!(defaults.link_type_id.as_deref(), Some("site.owns"));
        assert_eq!(
            defaults.image_url.as_deref(),
            Some("https://cdn.example.com/person.svg")
        );
    }

    #[test]
    fn unmapped_ids_pass_through() {
        let query = ServiceQuery::for_site("site-a");
        let mapped = mapped_config(&config(), &type_map(), &query).unwrap();

        assert_eq!(
            mapped.services[0].result_item_type_ids,
            vec!["site.person".to_string(), "ET2".to_string()]
        );
    }

    #[test]
    fn service_urls_are_site_tagged() {
        let query = ServiceQuery::for_site("site-a");
        let mapped = mapped_config(&config(), &type_map(), &query).unwrap();

        assert_eq!(
            mapped.services[0].url.as_deref(),
            Some("https://connector.example.com/find?siteid=site-a")
        );
    }

    #[test]
    fn default_site_keeps_urls_untouched() {
        let mapped = mapped_config(&config(), &type_map(), &ServiceQuery::default()).unwrap();
        assert_eq!(
            mapped.services[0].url.as_deref(),
            Some("https://connector.example.com/find")
        );
    }

    #[test]
    fn invalid_service_url_is_an_error() {
        let mut cfg = config();
        cfg.services[0].url = Some("not a url".to_string());

        let err = mapped_config(&cfg, &type_map(), &ServiceQuery::for_site("site-a")).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidServiceUrl { .. }));
    }

    #[test]
    fn mapping_does_not_mutate_the_source() {
        let cfg = config();
        let query = ServiceQuery::for_site("site-a");
        let _ = mapped_config(&cfg, &type_map(), &query).unwrap();

        assert_eq!(
            cfg.default_values.as_ref().unwrap().entity_type_id.as_deref(),
            Some("ET1")
        );
    }

    #[test]
    fn dto_carries_the_mapped_shape() {
        let dto = config_as_dto(&config());
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["defaultValues"]["entityTypeId"], "ET1");
        assert_eq!(json["services"][0]["resultItemTypeIds"][0], "ET1");
    }
}
