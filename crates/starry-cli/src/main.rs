//! Starry CLI - Deep-link details from the command line
//!
//! Features:
//! - Resolve a deep link against the start API
//! - Run the extractor over a saved start response

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// Starry CLI - Show and movie details
#[derive(Parser)]
#[command(name = "starry-cli")]
#[command(version)]
#[command(about = "Resolve deep links into show and movie details", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Start API endpoint
    #[arg(long, env = "STARRY_API_ENDPOINT")]
    endpoint: Option<String>,

    /// Region for the deep link and country header
    #[arg(long, env = "STARRY_REGION")]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch details for a deep link such as `shows/67890`
    Details {
        /// Content identifier
        id: String,

        /// User session token
        #[arg(short, long, env = "STARRY_USER_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Extract details from a saved start response
    Inspect {
        /// Path to the response JSON
        file: PathBuf,

        /// Treat the document as a series
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();
    starry_core::init();

    let config = commands::api_config(cli.endpoint, cli.region, |key| std::env::var(key).ok())?;

    match cli.command {
        Commands::Details { id, token } => {
            commands::details(config, &id, &token, &cli.format).await?;
        }
        Commands::Inspect { file, show } => {
            commands::inspect(&config, &file, show, &cli.format)?;
        }
    }

    Ok(())
}
