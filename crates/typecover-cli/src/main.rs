//! Typecover CLI - Defensive type coverage from the command line.

use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use typecover_catalog::PokeApiCatalog;
use typecover_cli::commands;
use typecover_cli::{Cli, Command, Config, Formatter};
use typecover_recommender::Analyzer;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr so stdout stays parseable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typecover=info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> typecover_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config from the given path or ~/.typecover/config.toml
    let config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let catalog = Arc::new(PokeApiCatalog::new(config.catalog.clone())?);
    let analyzer = Analyzer::new(Arc::clone(&catalog));

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &analyzer, &formatter).await?;
        }
        Command::Team(args) => {
            commands::execute_team(args, &analyzer, &formatter).await?;
        }
        Command::Compare(args) => {
            commands::execute_compare(args, &analyzer, &formatter).await?;
        }
        Command::Recommend(args) => {
            commands::execute_recommend(
                args,
                Arc::clone(&catalog),
                config.recommender.clone(),
                &formatter,
            )
            .await?;
        }
    }

    let stats = catalog.cache_stats();
    tracing::debug!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.entries,
        "catalog cache"
    );

    Ok(())
}
