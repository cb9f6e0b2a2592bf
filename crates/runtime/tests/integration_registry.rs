mod common;

use std::sync::Arc;

use common::{config_with_entity, stores_for};
use sitebridge_metadata::site::ServiceQuery;
use sitebridge_runtime::env::ConnectorEnvironment;
use sitebridge_runtime::error::ConnectorError;
use sitebridge_runtime::registry::ConnectorRegistry;
use sitebridge_test_support::{InMemoryStores, ManifestBuilder};

fn registry_for(fake: &InMemoryStores) -> ConnectorRegistry {
    ConnectorRegistry::new(
        stores_for(fake),
        Arc::new(fake.clone()),
        ConnectorEnvironment::default(),
    )
}

#[tokio::test]
async fn register_then_read_through_the_handle() -> anyhow::Result<()> {
    let fake = InMemoryStores::new();
    fake.put_config("acme/config", config_with_entity("ET1"));

    let registry = registry_for(&fake);
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search")
                .with_config("acme/config")
                .build(),
        )
        .await?;

    let handle = registry.runtime("acme")?;
    let runtime = handle.read().await;
    assert_eq!(runtime.connector_name(), "Acme Search");
    assert!(runtime.config_as_dto(&ServiceQuery::default()).is_ok());

    Ok(())
}

#[tokio::test]
async fn unknown_connector_is_an_error() {
    let fake = InMemoryStores::new();
    let registry = registry_for(&fake);

    let err = registry.runtime("ghost").unwrap_err();
    assert!(matches!(err, ConnectorError::UnknownConnector { .. }));
    assert!(err.to_string().contains("ghost"), "message: {err}");
}

#[tokio::test]
async fn register_replaces_the_previous_runtime() -> anyhow::Result<()> {
    let fake = InMemoryStores::new();
    fake.put_config("acme/config", config_with_entity("ET1"));
    fake.put_config("acme/config-v2", config_with_entity("ET2"));

    let registry = registry_for(&fake);
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search")
                .with_config("acme/config")
                .build(),
        )
        .await?;
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search v2")
                .with_config("acme/config-v2")
                .build(),
        )
        .await?;

    assert_eq!(registry.connector_ids(), vec!["acme".to_string()]);

    let handle = registry.runtime("acme")?;
    let runtime = handle.read().await;
    assert_eq!(runtime.connector_name(), "Acme Search v2");
    let value = serde_json::to_value(runtime.config_as_dto(&ServiceQuery::default())?)?;
    assert_eq!(value["defaultValues"]["entityTypeId"], "ET2");

    Ok(())
}

#[tokio::test]
async fn failed_registration_keeps_the_existing_runtime() -> anyhow::Result<()> {
    let fake = InMemoryStores::new();
    fake.put_config("acme/config", config_with_entity("ET1"));

    let registry = registry_for(&fake);
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search")
                .with_config("acme/config")
                .build(),
        )
        .await?;

    fake.fail_config("config store unavailable");
    let err = registry
        .register(
            ManifestBuilder::new("acme", "Acme Search v2")
                .with_config("acme/config")
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::CacheLoad { .. }));

    // The original registration still serves.
    let handle = registry.runtime("acme")?;
    assert_eq!(handle.read().await.connector_name(), "Acme Search");

    Ok(())
}

#[tokio::test]
async fn reload_goes_through_the_write_lock() -> anyhow::Result<()> {
    let fake = InMemoryStores::new();
    fake.put_config("acme/config", config_with_entity("ET1"));

    let registry = registry_for(&fake);
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search")
                .with_config("acme/config")
                .build(),
        )
        .await?;

    fake.put_config("acme/config", config_with_entity("ET2"));
    let ack = registry.reload("acme").await?;
    assert_eq!(ack.message, "Connector caches reloaded successfully.");

    let handle = registry.runtime("acme")?;
    let runtime = handle.read().await;
    let value = serde_json::to_value(runtime.config_as_dto(&ServiceQuery::default())?)?;
    assert_eq!(value["defaultValues"]["entityTypeId"], "ET2");

    Ok(())
}

#[tokio::test]
async fn remove_drops_the_registration() -> anyhow::Result<()> {
    let fake = InMemoryStores::new();
    fake.put_config("acme/config", config_with_entity("ET1"));

    let registry = registry_for(&fake);
    registry
        .register(
            ManifestBuilder::new("acme", "Acme Search")
                .with_config("acme/config")
                .build(),
        )
        .await?;

    assert!(registry.remove("acme"));
    assert!(!registry.remove("acme"));
    assert!(registry.runtime("acme").is_err());

    Ok(())
}
