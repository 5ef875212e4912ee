use clap::{crate_version, Parser, Subcommand};
use std::error::Error;
use tracing_subscriber::EnvFilter;

use commands::encode::EncodeArgs;
use commands::fetch::FetchArgs;

mod commands;
mod config;
mod error;
mod services;
mod utils;

#[derive(Parser)]
#[command(
    version = crate_version!(),
    about = "Prepares the MP3 samples used by the web piano."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Downloads the piano samples from the sound font host.
    Fetch(FetchArgs),
    /// Embeds local samples as Base64 data URIs in a script for offline use.
    Encode(EncodeArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        // Per-note failures are reported in the summary, not as an exit code.
        Commands::Fetch(args) => {
            commands::fetch::run(args).await?;
        }
        Commands::Encode(args) => {
            commands::encode::run(args)?;
        }
    }

    Ok(())
}
