//! Vivero CLI - seed and inspect the Vivero demo store.
//!
//! Commands:
//! - `vivero seed` - Bring a store to its demo-ready state
//! - `vivero catalog` - List products through the store API
//! - `vivero hero` - Render the landing page hero section
//! - `vivero config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, ConfigArgs, HeroArgs, SeedArgs};

/// Vivero CLI - Seed and inspect the Vivero demo store
#[derive(Parser)]
#[command(name = "vivero")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with demo data
    Seed(SeedArgs),

    /// List products visible to the storefront
    Catalog(CatalogArgs),

    /// Render the landing page hero section
    Hero(HeroArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Hero(args) => commands::hero::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
