//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod check;
pub mod config;
pub mod serve;

use clap::{Parser, Subcommand};

/// Location matcher - checks locations against a fixed reference point
#[derive(Parser)]
#[command(name = "locmatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Check a place or the current location against the reference
    Check(check::CheckArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Check(args) => check::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
