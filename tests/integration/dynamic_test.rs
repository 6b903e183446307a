//! Integration tests for the dynamic client

use super::common::{catalog_document, MockApiServer, CATALOG_COLLECTION};
use crdctl::api::{DynamicClient, ResourceClient};
use crdctl::client::CallContext;
use crdctl::error::CrdError;
use crdctl::resources::operators::CatalogSource;
use crdctl::resources::{ObjectKey, TypedResource};
use kube::core::GroupVersionKind;

#[tokio::test]
async fn test_dynamic_create_stores_document() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let key = ObjectKey::new("default", "r1");

    let stored = client
        .create(
            &CallContext::background(),
            &key,
            catalog_document("r1", "default", "Dynamic"),
        )
        .await
        .unwrap();

    assert_eq!(stored.metadata.name.as_deref(), Some("r1"));
    assert_eq!(stored.metadata.resource_version.as_deref(), Some("1"));
    assert_eq!(stored.data["spec"]["displayName"], "Dynamic");

    let on_server = server.stored(CATALOG_COLLECTION, "r1").unwrap();
    assert_eq!(on_server["kind"], "CatalogSource");
    assert_eq!(on_server["apiVersion"], "operators.coreos.com/v1alpha1");
}

#[tokio::test]
async fn test_dynamic_plural_from_kind() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    assert_eq!(client.resource().plural, "catalogsources");
}

#[tokio::test]
async fn test_dynamic_key_overrides_document_metadata() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let key = ObjectKey::new("default", "from-key");

    let stored = client
        .create(
            &CallContext::background(),
            &key,
            catalog_document("from-doc", "elsewhere", "Dynamic"),
        )
        .await
        .unwrap();

    assert_eq!(stored.metadata.name.as_deref(), Some("from-key"));
    assert_eq!(stored.metadata.namespace.as_deref(), Some("default"));
    assert!(server.stored(CATALOG_COLLECTION, "from-key").is_some());
}

#[tokio::test]
async fn test_dynamic_stamps_missing_type_meta() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let mut doc = catalog_document("r1", "default", "Dynamic");
    doc.types = None;

    let stored = client
        .create(&CallContext::background(), &ObjectKey::new("default", "r1"), doc)
        .await
        .unwrap();
    assert_eq!(stored.types.unwrap().kind, "CatalogSource");
}

#[tokio::test]
async fn test_dynamic_rejects_document_of_other_kind() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let mut doc = catalog_document("r1", "default", "Dynamic");
    doc.types.as_mut().unwrap().kind = "Subscription".to_string();

    let err = client
        .create(&CallContext::background(), &ObjectKey::new("default", "r1"), doc)
        .await
        .unwrap_err();
    assert!(matches!(err, CrdError::InvalidArgument(_)));
    assert_eq!(server.request_count().await, 0);
}

#[tokio::test]
async fn test_dynamic_create_conflict() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let ctx = CallContext::background();
    let key = ObjectKey::new("default", "r1");

    client
        .create(&ctx, &key, catalog_document("r1", "default", "first"))
        .await
        .unwrap();
    let err = client
        .create(&ctx, &key, catalog_document("r1", "default", "second"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    let kept = server.stored(CATALOG_COLLECTION, "r1").unwrap();
    assert_eq!(kept["spec"]["displayName"], "first");
}

#[tokio::test]
async fn test_dynamic_get_round_trip() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let ctx = CallContext::background();
    let key = ObjectKey::new("default", "r1");

    let created = client
        .create(&ctx, &key, catalog_document("r1", "default", "Dynamic"))
        .await
        .unwrap();
    let fetched = client.get(&ctx, &key).await.unwrap();

    assert_eq!(fetched.metadata, created.metadata);
    assert_eq!(fetched.data, created.data);
}

#[tokio::test]
async fn test_dynamic_get_not_found() {
    let server = MockApiServer::start().await;
    let client = DynamicClient::new(server.transport().await, &CatalogSource::gvk());
    let err = client
        .get(&CallContext::background(), &ObjectKey::new("default", "missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_dynamic_unregistered_kind_is_left_to_server() {
    let server = MockApiServer::start().await;
    let gvk = GroupVersionKind::gvk("example.com", "v1", "Widget");
    let client = DynamicClient::new(server.transport().await, &gvk);
    let mut doc = catalog_document("w1", "default", "Widget");
    doc.types = None;

    let stored = client
        .create(&CallContext::background(), &ObjectKey::new("default", "w1"), doc)
        .await
        .unwrap();
    assert_eq!(stored.types.unwrap().kind, "Widget");
    assert!(server
        .stored("/apis/example.com/v1/namespaces/default/widgets", "w1")
        .is_some());
}
