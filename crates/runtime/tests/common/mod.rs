#![allow(dead_code)]

use std::sync::Arc;

use sitebridge_metadata::config::{ConnectorConfig, DefaultValues, ServiceEntry};
use sitebridge_metadata::typemap::{TypeMap, TypeMapping};
use sitebridge_runtime::env::ConnectorEnvironment;
use sitebridge_runtime::runtime::{ConnectorRuntime, ConnectorStores};
use sitebridge_settings::manifest::ConnectorManifest;
use sitebridge_test_support::InMemoryStores;

pub fn stores_for(fake: &InMemoryStores) -> ConnectorStores {
    ConnectorStores {
        config: Arc::new(fake.clone()),
        schemas: Arc::new(fake.clone()),
        charting_schemes: Arc::new(fake.clone()),
        type_maps: Arc::new(fake.clone()),
        transforms: Arc::new(fake.clone()),
    }
}

pub fn runtime_for(fake: &InMemoryStores, manifest: ConnectorManifest) -> ConnectorRuntime {
    ConnectorRuntime::new(
        Arc::new(manifest),
        stores_for(fake),
        Arc::new(fake.clone()),
        ConnectorEnvironment::default(),
    )
}

pub fn config_with_entity(entity_type_id: &str) -> ConnectorConfig {
    ConnectorConfig {
        default_values: Some(DefaultValues {
            entity_type_id: Some(entity_type_id.to_string()),
            link_type_id: None,
            image_url: None,
        }),
        services: vec![ServiceEntry {
            id: "find-things".to_string(),
            name: "Find things".to_string(),
            description: None,
            url: Some("https://connector.example.com/find".to_string()),
            result_item_type_ids: vec![entity_type_id.to_string()],
        }],
    }
}

pub fn type_map_to(schema_type_id: &str) -> TypeMap {
    TypeMap {
        mappings: vec![TypeMapping {
            logical_type_id: "ET1".to_string(),
            schema_type_id: schema_type_id.to_string(),
            image_url: None,
        }],
    }
}
