//! crdctl - create and read CatalogSource resources

use anyhow::Result;
use clap::Parser;
use crdctl::cli::{Cli, Command};
use crdctl::commands::{self, Session};
use crdctl::config::load_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    setup_tracing(cli.verbose);

    if let Command::Completions(ref args) = cli.command {
        generate_completions(args.shell);
        return Ok(());
    }

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli) -> crdctl::error::Result<()> {
    let config = load_config()?;
    let session = Session::connect(cli, &config).await?;

    match cli.command {
        Command::Create(ref args) => commands::run_create(&session, args, cli.output).await,
        Command::Get(ref args) => commands::run_get(&session, args, cli.output).await,
        Command::Demo(ref args) => commands::run_demo(&session, args, cli.output).await,
        Command::Completions(_) => Ok(()),
    }
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "crdctl", &mut std::io::stdout());
}
