use clap::Args;
use std::error::Error;
use std::path::PathBuf;

use crate::config::{EncodeConfig, ToolsConfig};
use crate::services::asset_encoder::{encode_samples, EncodeOutcome};

#[derive(Args, Debug, Default)]
pub struct EncodeArgs {
    /// JSON config file; flags given here take precedence over it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the MP3 samples.
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,
    /// Script to generate.
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
}

impl EncodeArgs {
    pub fn apply(self, base: EncodeConfig) -> EncodeConfig {
        EncodeConfig {
            input_dir: self.input_dir.unwrap_or(base.input_dir),
            output_file: self.output_file.unwrap_or(base.output_file),
            ..base
        }
    }
}

pub fn run(args: EncodeArgs) -> Result<EncodeOutcome, Box<dyn Error>> {
    let file_config = ToolsConfig::load_or_default(args.config.as_deref())?;
    let config = args.apply(file_config.encode);

    let outcome = encode_samples(&config)?;
    if let EncodeOutcome::Written { path, count } = &outcome {
        println!("Generated file '{}' with {count} sounds.", path.display());
        println!(
            "IMPORTANT: Make sure to copy the '{}' file to the 'webpiano' directory when you are happy with it.",
            path.display()
        );
    }
    Ok(outcome)
}
