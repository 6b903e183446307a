//! Get command implementation

use super::Session;
use crate::cli::GetArgs;
use crate::error::Result;
use crate::output::{format_resource, OutputFormat};
use crate::resources::operators::CatalogSource;

/// Run the get command
pub async fn run_get(session: &Session, args: &GetArgs, output: OutputFormat) -> Result<()> {
    let client = session.client::<CatalogSource>(session.strategy)?;
    let stored = client
        .get(&session.call_context(), &session.key(&args.name))
        .await?;

    println!("{}", format_resource(&stored, output)?);
    Ok(())
}
