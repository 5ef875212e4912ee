use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str =
    "https://gleitz.github.io/midi-js-soundfonts/FatBoy/acoustic_grand_piano-mp3/";
pub const DEFAULT_SAMPLES_DIR: &str = "./samples/";
pub const DEFAULT_OUTPUT_FILE: &str = "sounds.js";

/// One octave starting at middle C, in the order the samples are fetched.
pub const DEFAULT_NOTES: [&str; 12] = [
    "C4", "Db4", "D4", "Eb4", "E4", "F4", "Gb4", "G4", "Ab4", "A4", "Bb4", "B4",
];

/// Settings for `fetch`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Prefix every `<note>.mp3` is appended to. Must end with `/`.
    pub base_url: String,
    pub output_dir: PathBuf,
    pub notes: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_SAMPLES_DIR),
            notes: DEFAULT_NOTES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Settings for `encode`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EncodeConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    /// File extension without the leading dot.
    pub extension: String,
    pub mime_type: String,
    /// Name of the `const` declared in the generated script.
    pub variable_name: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_SAMPLES_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extension: "mp3".to_string(),
            mime_type: "audio/mp3".to_string(),
            variable_name: "sounds".to_string(),
        }
    }
}

/// Top level of a JSON config file. Both sections are optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub fetch: FetchConfig,
    pub encode: EncodeConfig,
}

impl ToolsConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
