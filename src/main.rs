//! memo CLI - Entry point
//!
//! Usage: memo <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo::cli::{Cli, Commands};
use memo::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("memo=debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    // Load configuration once; commands receive it by reference
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = if config_path.is_file() {
        Config::load_from(&config_path)?
    } else if cli.config.is_some() {
        anyhow::bail!("config file {} does not exist", config_path.display());
    } else {
        Config::default()
    };

    // Run command; an Err here becomes a message and a non-zero exit
    match cli.command {
        Commands::New(args) => memo::cli::new::run(args, &config),
        Commands::Edit(args) => memo::cli::edit::run(args, &config),
        Commands::Delete(args) => memo::cli::delete::run(args, &config),
        Commands::List(args) => memo::cli::list::run(args, &config),
        Commands::View(args) => memo::cli::view::run(args, &config),
        Commands::Serve(args) => memo::cli::serve::run(args, &config).await,
        Commands::Config(args) => memo::cli::config::run(args, &config, &config_path),
    }
}
