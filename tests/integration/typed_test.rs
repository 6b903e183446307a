//! Integration tests for the scheme-aware typed client

use super::common::{catalog_source, operators_scheme, MockApiServer, CATALOG_COLLECTION};
use crdctl::api::{ResourceClient, TypedClient};
use crdctl::client::CallContext;
use crdctl::error::{ConversionError, CrdError};
use crdctl::resources::operators::CatalogSource;
use crdctl::resources::{ObjectKey, Scheme};
use std::sync::Arc;

#[tokio::test]
async fn test_typed_create_and_get() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, operators_scheme());
    let ctx = CallContext::background();
    let key = ObjectKey::new("default", "cs-typed-client");

    let created = client
        .create(&ctx, &key, catalog_source("cs-typed-client", "default", "Typed"))
        .await
        .unwrap();
    assert_eq!(created.spec.display_name.as_deref(), Some("Typed"));

    let fetched = client.get(&ctx, &key).await.unwrap();
    assert_eq!(fetched, created);
    assert!(server.stored(CATALOG_COLLECTION, "cs-typed-client").is_some());
}

#[tokio::test]
async fn test_typed_unregistered_kind_sends_nothing() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, Arc::new(Scheme::new()));

    let err = client
        .create(
            &CallContext::background(),
            &ObjectKey::new("default", "r1"),
            catalog_source("r1", "default", "Typed"),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CrdError::Conversion(ConversionError::Unregistered(_))
    ));
    assert_eq!(server.request_count().await, 0);
}

#[tokio::test]
async fn test_typed_get_unregistered_kind() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, Arc::new(Scheme::new()));
    let err = client
        .get(&CallContext::background(), &ObjectKey::new("default", "r1"))
        .await
        .unwrap_err();
    assert!(matches!(err, CrdError::Conversion(_)));
    assert_eq!(server.request_count().await, 0);
}

#[tokio::test]
async fn test_typed_create_conflict() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, operators_scheme());
    let ctx = CallContext::background();
    let key = ObjectKey::new("default", "r1");

    client
        .create(&ctx, &key, catalog_source("r1", "default", "first"))
        .await
        .unwrap();
    let err = client
        .create(&ctx, &key, catalog_source("r1", "default", "second"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_typed_get_not_found() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, operators_scheme());
    let err = client
        .get(&CallContext::background(), &ObjectKey::new("default", "missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_typed_key_wins_over_payload_metadata() {
    let server = MockApiServer::start().await;
    let client = TypedClient::<CatalogSource>::new(server.transport().await, operators_scheme());

    let created = client
        .create(
            &CallContext::background(),
            &ObjectKey::new("default", "from-key"),
            catalog_source("from-payload", "other", "Typed"),
        )
        .await
        .unwrap();
    assert_eq!(created.metadata.name.as_deref(), Some("from-key"));
    assert_eq!(created.metadata.namespace.as_deref(), Some("default"));
}
