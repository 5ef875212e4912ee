use std::path::PathBuf;

/// Failure to load a JSON config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised by the sample fetcher.
///
/// `EmptyNote`, `InvalidBaseUrl` and `CreateDir` abort the whole run. The
/// remaining variants describe a single note and end up in the report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("note #{index} is empty")]
    EmptyNote { index: usize },
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised by the asset encoder. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{first} and {second} both map to key \"{key}\"")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },
}
