//! UpSETF CLI - Weighted overlap of ETF holdings.
//!
//! # Usage
//!
//! ```bash
//! # Overlap of three ETFs (profiles are cached under ./data)
//! upsetf overlap SPY QQQ XLK
//!
//! # Store an API key once
//! upsetf config set api_key YOUR_KEY
//!
//! # Re-use cached profiles only, as JSON
//! upsetf overlap SPY QQQ --offline --format json
//!
//! # Inspect the cache
//! upsetf cache list
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::Context;
use settings::{default_config_path, Settings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let settings = Settings::load(&config_path)?;

    let ctx = Context {
        format: cli.format.or(settings.format).unwrap_or_default(),
        quiet: cli.quiet,
        settings,
        config_path,
    };

    match cli.command {
        Commands::Overlap(args) => commands::overlap::execute(args, &ctx).await?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
        Commands::Cache(args) => commands::cache::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON, and CSV output stay clean on stdout.
fn init_logging(verbose: u8, quiet: bool) {
    let default_filter = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,upsetf=info",
        (false, 1) => "warn,upsetf=debug",
        (false, _) => "info,upsetf=trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
