//! Demo command: one catalog source per client variant

use super::Session;
use crate::api::{DynamicClient, RawClient, ResourceClient, TypedClient};
use crate::cli::DemoArgs;
use crate::convert;
use crate::error::Result;
use crate::output::{format_document, format_resource, OutputFormat};
use crate::resources::operators::{CatalogSource, SourceType};
use crate::resources::TypedResource;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::{DynamicObject, TypeMeta};
use serde_json::json;
use tracing::info;

/// Run the demo command
pub async fn run_demo(session: &Session, args: &DemoArgs, output: OutputFormat) -> Result<()> {
    let stored = create_dynamic(session, &args.image).await?;
    println!("{}", format_document(&stored, output)?);
    let catalog: CatalogSource = convert::to_typed(&stored, &session.scheme)?;
    println!("{}", format_resource(&catalog, output)?);

    let catalog = create_raw(session, &args.image).await?;
    println!("{}", format_resource(&catalog, output)?);

    let catalog = create_typed(session, &args.image).await?;
    println!("{}", format_resource(&catalog, output)?);

    Ok(())
}

/// Create `cs-dynamic` from a hand-built document, then read it back
async fn create_dynamic(session: &Session, image: &str) -> Result<DynamicObject> {
    let gvk = CatalogSource::gvk();
    let doc = DynamicObject {
        types: Some(TypeMeta {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
        }),
        metadata: ObjectMeta::default(),
        data: json!({
            "spec": {
                "sourceType": SourceType::Grpc,
                "image": image,
                "displayName": "CS - Dynamic Client",
            }
        }),
    };

    let key = session.key("cs-dynamic");
    info!(%key, "creating with the dynamic client");
    let client = DynamicClient::new(session.transport.clone(), &gvk);
    client.create(&session.call_context(), &key, doc).await?;
    client.get(&session.call_context(), &key).await
}

/// Create `cs-rest-client` on a manually routed request
async fn create_raw(session: &Session, image: &str) -> Result<CatalogSource> {
    let key = session.key("cs-rest-client");
    info!(%key, "creating with the raw client");
    let catalog = CatalogSource::grpc(&key.name, image).with_display_name("CS - Rest Client");

    let client = RawClient::<CatalogSource>::new(session.transport.clone())?
        .with_resource("catalogsources");
    client.create(&session.call_context(), &key, catalog).await
}

/// Create `cs-typed-client` through the scheme-aware client
async fn create_typed(session: &Session, image: &str) -> Result<CatalogSource> {
    let key = session.key("cs-typed-client");
    info!(%key, "creating with the typed client");
    let catalog = CatalogSource::grpc(&key.name, image)
        .with_namespace(&key.namespace)
        .with_display_name("CS - Typed Client");

    let client =
        TypedClient::<CatalogSource>::new(session.transport.clone(), session.scheme.clone());
    client.create(&session.call_context(), &key, catalog).await
}
