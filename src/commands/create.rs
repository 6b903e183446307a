//! Create command implementation

use super::Session;
use crate::cli::CreateArgs;
use crate::error::Result;
use crate::output::{format_resource, OutputFormat};
use crate::resources::operators::{CatalogSource, CatalogSourceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::info;

/// Run the create command
pub async fn run_create(session: &Session, args: &CreateArgs, output: OutputFormat) -> Result<()> {
    let catalog = CatalogSource {
        metadata: ObjectMeta::default(),
        spec: CatalogSourceSpec {
            source_type: args.source_type,
            image: Some(args.image.clone()),
            display_name: args.display_name.clone(),
            publisher: args.publisher.clone(),
            ..Default::default()
        },
    };

    let key = session.key(&args.name);
    info!(%key, strategy = %session.strategy, "creating catalog source");

    let client = session.client::<CatalogSource>(session.strategy)?;
    let stored = client.create(&session.call_context(), &key, catalog).await?;

    println!("{}", format_resource(&stored, output)?);
    Ok(())
}
