use clap::Args;
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{FetchConfig, ToolsConfig};
use crate::services::sample_fetcher::{fetch_samples, FetchReport};

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// JSON config file; flags given here take precedence over it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Remote directory the `<note>.mp3` files are fetched from.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Directory the samples are written to.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Comma separated list of notes, e.g. C4,Db4,D4.
    #[arg(long, value_delimiter = ',')]
    pub notes: Option<Vec<String>>,
}

impl FetchArgs {
    /// Layers the command line flags on top of `base`.
    pub fn apply(self, base: FetchConfig) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.unwrap_or(base.base_url),
            output_dir: self.output_dir.unwrap_or(base.output_dir),
            notes: self.notes.unwrap_or(base.notes),
        }
    }
}

pub async fn run(args: FetchArgs) -> Result<FetchReport, Box<dyn Error>> {
    let file_config = ToolsConfig::load_or_default(args.config.as_deref())?;
    let config = args.apply(file_config.fetch);
    info!(
        "Fetching {} samples from {}",
        config.notes.len(),
        config.base_url
    );

    let client = Client::new();
    let report = fetch_samples(&client, &config).await?;

    for failed in &report.failed {
        warn!("{}: {}", failed.note, failed.error);
    }
    println!(
        "Download completed. {} files saved in {}. There were {} errors.",
        report.num_ok(),
        config.output_dir.display(),
        report.num_failed()
    );
    Ok(report)
}
