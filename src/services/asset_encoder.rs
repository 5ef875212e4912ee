use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::EncodeConfig;
use crate::error::EncodeError;
use crate::utils::data_uri::data_uri;
use crate::utils::sanitize_key::sanitize_key;
use crate::utils::sounds_script::{write_sounds_script, SoundEntry};

#[derive(Debug, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Nothing matched the extension; no file was written.
    NoInput,
    Written { path: PathBuf, count: usize },
}

/// Encodes every `*.<extension>` file in `input_dir` as a data URI and writes
/// them into a single script at `output_file`.
///
/// Files are processed in name order. All reads happen before the output
/// is opened, so a read failure leaves any previous output untouched.
pub fn encode_samples(config: &EncodeConfig) -> Result<EncodeOutcome, EncodeError> {
    info!(
        "Reading *.{} files from {}...",
        config.extension,
        config.input_dir.display()
    );

    let file_names = list_sample_files(&config.input_dir, &config.extension)?;
    if file_names.is_empty() {
        info!("No *.{} files found in the directory.", config.extension);
        return Ok(EncodeOutcome::NoInput);
    }

    let mut entries = Vec::with_capacity(file_names.len());
    let mut sources: HashMap<String, &str> = HashMap::new();
    for file_name in &file_names {
        let key = sanitize_key(file_name, &config.extension);
        if let Some(first) = sources.insert(key.clone(), file_name) {
            return Err(EncodeError::KeyCollision {
                key,
                first: first.to_string(),
                second: file_name.clone(),
            });
        }

        let path = config.input_dir.join(file_name);
        let bytes = fs::read(&path).map_err(|source| EncodeError::Read { path, source })?;
        info!("Encoded {file_name} as {key}");
        entries.push(SoundEntry {
            key,
            data_uri: data_uri(&config.mime_type, &bytes),
        });
    }

    write_sounds_script(&config.output_file, &config.variable_name, &entries).map_err(
        |source| EncodeError::Write {
            path: config.output_file.clone(),
            source,
        },
    )?;

    Ok(EncodeOutcome::Written {
        path: config.output_file.clone(),
        count: entries.len(),
    })
}

/// Sorted names of the entries in `dir` ending with `.<extension>`.
fn list_sample_files(dir: &Path, extension: &str) -> Result<Vec<String>, EncodeError> {
    let read_dir_err = |source| EncodeError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let suffix = format!(".{extension}");
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(&suffix) => names.push(name),
            Ok(_) => {}
            Err(name) => warn!("Skipping non UTF-8 file name {name:?}"),
        }
    }
    names.sort();
    Ok(names)
}
