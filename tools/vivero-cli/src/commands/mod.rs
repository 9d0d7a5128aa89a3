//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod hero;
pub mod seed;

use clap::{Args, Subcommand};

/// Arguments for the seed command.
#[derive(Args)]
pub struct SeedArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Run against an in-memory store instead of the backend.
    #[arg(long)]
    pub dry_run: bool,

    /// Dataset file (TOML or JSON) to seed instead of the built-in one.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Write the publishable key token to this path.
    #[arg(short, long)]
    pub key_file: Option<String>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Locale sent with the request.
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Maximum number of products to list.
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the hero command.
#[derive(Args)]
pub struct HeroArgs {
    /// Override the title.
    #[arg(long)]
    pub title: Option<String>,

    /// Override the subtitle.
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Override the body text.
    #[arg(long)]
    pub text: Option<String>,

    /// Write the markup to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration and seed dataset.
    Validate,
}
