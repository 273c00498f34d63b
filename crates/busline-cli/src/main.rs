//! `busline` binary entry point

use anyhow::Result;
use busline_cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // logs go to stderr so the rendered page owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    // the page is a single-threaded event loop
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            Commands::Browse(args) => busline_cli::commands::browse::execute(&args, &settings).await,
            Commands::Lines(args) => busline_cli::commands::lines::execute(&args, &settings).await,
        }
    })
}
