//! CLI command definitions using clap

use crate::api::Strategy;
use crate::output::OutputFormat;
use crate::resources::operators::SourceType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Image served by the catalogs the demo creates
pub const DEMO_IMAGE: &str = "sbarouti/gitlab-runner-operator-indeximage:v0.0.1-04925b2b";

#[derive(Parser)]
#[command(
    name = "crdctl",
    version,
    about = "Create and read CatalogSource resources through dynamic, raw or typed clients",
    long_about = None,
)]
pub struct Cli {
    /// Path to a kubeconfig file (defaults to $KUBECONFIG, then in-cluster, then ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubernetes context to use
    #[arg(long, global = true, env = "CRDCTL_CONTEXT")]
    pub context: Option<String>,

    /// Namespace to use
    #[arg(short = 'n', long, global = true, env = "CRDCTL_NAMESPACE")]
    pub namespace: Option<String>,

    /// Client variant
    #[arg(short = 's', long, global = true, value_enum)]
    pub strategy: Option<Strategy>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "yaml")]
    pub output: OutputFormat,

    /// Deadline for each request, in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a CatalogSource
    Create(CreateArgs),

    /// Get a CatalogSource by name
    Get(GetArgs),

    /// Create one CatalogSource with each client variant
    Demo(DemoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Resource name
    pub name: String,

    /// Index image to serve
    #[arg(long)]
    pub image: String,

    /// How the catalog is served (grpc, configmap, internal)
    #[arg(long, default_value = "grpc")]
    pub source_type: SourceType,

    /// Human readable name
    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub publisher: Option<String>,
}

#[derive(Args, Clone)]
pub struct GetArgs {
    /// Resource name
    pub name: String,
}

#[derive(Args, Clone)]
pub struct DemoArgs {
    /// Index image served by every demo catalog
    #[arg(long, default_value = DEMO_IMAGE)]
    pub image: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
